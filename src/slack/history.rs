//! Read recent messages, and the reactions on them, from a channel.

use super::{
    api::{send, SlackClient},
    channel::ChannelId,
    error::SlackError,
};
use serde::{Deserialize, Serialize};

/// A message as far as reaction counting is concerned. Everything else Slack
/// sends is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// An emoji applied to a message, and how many users applied it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Reaction {
    pub name: String,
    pub count: u64,
}

/// <https://api.slack.com/methods/conversations.history#args>
#[derive(Serialize)]
struct HistoryRequest<'a> {
    channel: &'a ChannelId,
    limit: u16,
}

/// <https://api.slack.com/methods/conversations.history#examples>
#[derive(Deserialize)]
struct HistoryResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    has_more: bool,
}

/// The most recent page of a channel's history.
pub struct History {
    pub messages: Vec<Message>,
    /// Whether older messages exist beyond the requested limit.
    pub has_more: bool,
}

impl SlackClient {
    /// Get up to `limit` of the most recent messages in a channel.
    pub async fn history(&self, channel: &ChannelId, limit: u16) -> Result<History, SlackError> {
        let res: HistoryResponse = send(
            self.get("/conversations.history")
                .query(&HistoryRequest { channel, limit }),
        )
        .await?;

        Ok(History {
            messages: res.messages,
            has_more: res.has_more,
        })
    }
}
