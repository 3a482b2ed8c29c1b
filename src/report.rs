//! Rank emoji by total usage and print the result.

use crate::tally::EmojiTally;
use std::io::{self, Write};

pub const HEADER: &str = "Emoji Usage Rankings:";

/// One row of the ranking.
#[derive(Debug, PartialEq, Eq)]
pub struct Ranked<'a> {
    /// 1-indexed.
    pub rank: usize,
    pub name: &'a str,
    pub count: u64,
}

/// Sort a tally by count, highest first. Equal counts keep the tally's
/// alphabetical order.
pub fn rank(tally: &EmojiTally) -> Vec<Ranked<'_>> {
    let mut xs: Vec<(&str, u64)> = tally.iter().collect();
    xs.sort_by(|a, b| b.1.cmp(&a.1));

    xs.into_iter()
        .enumerate()
        .map(|(i, (name, count))| Ranked {
            rank: i + 1,
            name,
            count,
        })
        .collect()
}

/// Write the header followed by one `<rank>. <name>: <count>` line per emoji.
pub fn write_report<W: Write>(out: &mut W, ranking: &[Ranked<'_>]) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;

    for r in ranking {
        writeln!(out, "{}. {}: {}", r.rank, r.name, r.count)?;
    }

    out.flush()
}
