//! Accumulate reaction counts by emoji name.

use crate::slack::history::{Message, Reaction};
use std::collections::BTreeMap;

/// Running totals per emoji name for the current run.
// Ordered so that iteration, and therefore the tie order of the ranking, is
// deterministic.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct EmojiTally(BTreeMap<String, u64>);

impl EmojiTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reaction(&mut self, reaction: &Reaction) {
        let total = self.0.entry(reaction.name.to_owned()).or_insert(0);
        *total = total.saturating_add(reaction.count);
    }

    pub fn add_messages<'a, I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = &'a Message>,
    {
        messages
            .into_iter()
            .flat_map(|m| m.reactions.iter())
            .for_each(|r| self.add_reaction(r));
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> u64 {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
