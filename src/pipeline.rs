//! The end-to-end survey: authenticate, enumerate channels, read each
//! channel's recent history, then tally and rank reactions.
//!
//! Only a missing token, failed authentication, or a failed channel listing
//! abort a run. Anything that goes wrong for a single channel is captured as
//! a [ChannelOutcome] and the run moves on to the next channel.

use crate::{
    config::Config,
    error::Fatal,
    report::{rank, write_report},
    slack::{
        api::SlackClient,
        auth::Identity,
        channel::Channel,
        error::SlackError,
        history::Message,
    },
    tally::EmojiTally,
};
use std::io::Write;
use tracing::{debug, info, warn};

/// Why a channel's history was never requested.
#[derive(Debug)]
pub enum SkipReason {
    Archived,
    /// Joining failed and we're not already a member.
    NotJoined(SlackError),
}

/// What happened when surveying a single channel.
#[derive(Debug)]
pub enum ChannelOutcome {
    Fetched(Vec<Message>),
    Skipped(SkipReason),
    Failed(SlackError),
}

pub struct ChannelReport {
    pub channel: Channel,
    pub outcome: ChannelOutcome,
}

/// Load config via `lookup`, survey the workspace, and write the confirmation
/// line and ranking to `out`. Returns the final tally.
pub async fn run<F, W>(lookup: F, out: &mut W) -> Result<EmojiTally, Fatal>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let config = Config::from_lookup(lookup)?;
    let client = SlackClient::new(config.api_base(), config.token.clone());

    let identity = authenticate(&client).await?;
    writeln!(out, "Authenticated as user: {}", identity.user)?;

    let channels = enumerate(&client, config.channel_limit).await?;
    let reports = survey(&client, &config, channels).await;
    summarise(&reports);

    let tally = aggregate(&reports);
    if tally.is_empty() {
        warn!("No reactions found");
    } else {
        info!("Counted {} distinct emoji", tally.len());
    }

    write_report(out, &rank(&tally))?;

    Ok(tally)
}

async fn authenticate(client: &SlackClient) -> Result<Identity, Fatal> {
    let identity = client.auth_test().await.map_err(Fatal::Authentication)?;

    info!(
        user_id = %identity.user_id,
        team = %identity.team.as_deref().unwrap_or("unknown"),
        "Authenticated"
    );

    Ok(identity)
}

async fn enumerate(client: &SlackClient, limit: u16) -> Result<Vec<Channel>, Fatal> {
    let page = client
        .list_channels(limit)
        .await
        .map_err(Fatal::ChannelList)?;

    if page.truncated {
        warn!(
            "More than {} channels exist; only the first {} will be surveyed",
            limit, limit
        );
    }

    info!("Found {} channels", page.channels.len());
    Ok(page.channels)
}

/// Survey every channel in turn, one request at a time.
pub async fn survey(
    client: &SlackClient,
    config: &Config,
    channels: Vec<Channel>,
) -> Vec<ChannelReport> {
    let mut reports = Vec::with_capacity(channels.len());

    for channel in channels {
        let outcome = survey_channel(client, config, &channel).await;
        log_outcome(&channel, &outcome);
        reports.push(ChannelReport { channel, outcome });
    }

    reports
}

async fn survey_channel(
    client: &SlackClient,
    config: &Config,
    channel: &Channel,
) -> ChannelOutcome {
    if config.join_channels {
        if let Err(reason) = ensure_membership(client, channel).await {
            return ChannelOutcome::Skipped(reason);
        }
    }

    match client.history(&channel.id, config.history_limit).await {
        Ok(history) => {
            if history.has_more {
                debug!("{} has more than {} messages", channel.name, config.history_limit);
            }

            ChannelOutcome::Fetched(history.messages)
        }
        Err(e) => ChannelOutcome::Failed(e),
    }
}

/// Make sure we can read a channel, joining it if need be. Archived channels
/// can't be joined and are skipped outright.
async fn ensure_membership(client: &SlackClient, channel: &Channel) -> Result<(), SkipReason> {
    if channel.is_archived {
        return Err(SkipReason::Archived);
    }

    let join_err = match client.join_channel(&channel.id).await {
        Ok(_) => {
            info!("Joined {}", channel.name);
            return Ok(());
        }
        Err(e) => e,
    };

    // Private channels can't be joined, but we may already be in them.
    match client.is_member(&channel.id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(SkipReason::NotJoined(join_err)),
        Err(e) => {
            warn!("Could not check membership of {}: {}", channel.name, e);
            Err(SkipReason::NotJoined(join_err))
        }
    }
}

fn log_outcome(channel: &Channel, outcome: &ChannelOutcome) {
    match outcome {
        ChannelOutcome::Fetched(messages) => {
            debug!("Read {} messages from {}", messages.len(), channel.name)
        }
        ChannelOutcome::Skipped(SkipReason::Archived) => {
            info!("Skipping archived channel {}", channel.name)
        }
        ChannelOutcome::Skipped(SkipReason::NotJoined(e)) => {
            warn!("Skipping {}, could not join: {}", channel.name, e)
        }
        ChannelOutcome::Failed(e) => {
            warn!("Error getting history for {}: {}", channel.name, e)
        }
    }
}

fn summarise(reports: &[ChannelReport]) {
    let (mut fetched, mut skipped, mut messages) = (0, 0, 0);
    let mut failed = Vec::new();

    for r in reports {
        match &r.outcome {
            ChannelOutcome::Fetched(xs) => {
                fetched += 1;
                messages += xs.len();
            }
            ChannelOutcome::Skipped(_) => skipped += 1,
            ChannelOutcome::Failed(_) => failed.push(r.channel.name.to_string()),
        }
    }

    info!(fetched, skipped, failed = failed.len(), messages, "Survey complete");

    if !failed.is_empty() {
        warn!("Could not read history from {}", failed.join(", "));
    }
}

/// Tally reactions across every channel whose history was fetched.
pub fn aggregate(reports: &[ChannelReport]) -> EmojiTally {
    let mut tally = EmojiTally::new();

    for r in reports {
        if let ChannelOutcome::Fetched(messages) = &r.outcome {
            tally.add_messages(messages);
        }
    }

    tally
}
