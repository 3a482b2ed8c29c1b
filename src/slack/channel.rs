//! Enumerate Slack channels, including the ability to programmatically join
//! them.

use super::{
    api::{send, SlackClient},
    error::SlackError,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use std::fmt;

/// Channel names as are visible in the Slack UI, without the leading hash.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelName(pub String);

/// Format without the surrounding newtype wrapper.
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Because channel names can change, Slack's API refers to channels by their
/// underlying ID.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// The metadata we care about per-channel within [ListResponse].
#[derive(Clone, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: ChannelName,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_member: bool,
}

/// The channel kinds we survey. DMs and group DMs are excluded.
const CHANNEL_TYPES: &str = "public_channel,private_channel";

/// <https://api.slack.com/methods/conversations.list#args>
#[derive(Serialize)]
struct ListRequest {
    types: &'static str,
    /// Maximum supported is 1000. Only a single page is ever requested.
    limit: u16,
}

/// <https://api.slack.com/methods/conversations.list#examples>
#[derive(Deserialize)]
struct ListResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    channels: Vec<Channel>,
    #[serde(default)]
    response_metadata: Option<PaginationMeta>,
}

/// The metadata attached to a [ListResponse], indicating further pages.
#[serde_as]
#[derive(Deserialize)]
struct PaginationMeta {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    next_cursor: Option<String>,
}

/// A single page of channels.
pub struct ChannelPage {
    pub channels: Vec<Channel>,
    /// Whether Slack has more channels than fit within the requested limit.
    pub truncated: bool,
}

/// <https://api.slack.com/methods/conversations.join#args>
#[derive(Serialize)]
struct JoinRequest<'a> {
    channel: &'a ChannelId,
}

/// <https://api.slack.com/methods/conversations.join#examples>
#[derive(Deserialize)]
struct JoinResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
}

/// <https://api.slack.com/methods/conversations.info#args>
#[derive(Serialize)]
struct InfoRequest<'a> {
    channel: &'a ChannelId,
}

/// <https://api.slack.com/methods/conversations.info#examples>
#[derive(Deserialize)]
struct InfoResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    channel: Channel,
}

impl SlackClient {
    /// Get the first `limit` public and private channels visible to the token.
    pub async fn list_channels(&self, limit: u16) -> Result<ChannelPage, SlackError> {
        let res: ListResponse = send(self.get("/conversations.list").query(&ListRequest {
            types: CHANNEL_TYPES,
            limit,
        }))
        .await?;

        let truncated = res
            .response_metadata
            .and_then(|meta| meta.next_cursor)
            .is_some();

        Ok(ChannelPage {
            channels: res.channels,
            truncated,
        })
    }

    /// We must join public channels before we can read their history.
    pub async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError> {
        let _: JoinResponse = send(
            self.post("/conversations.join")
                .json(&JoinRequest { channel }),
        )
        .await?;

        Ok(())
    }

    /// Look up whether the token's user is currently in the channel.
    pub async fn is_member(&self, channel: &ChannelId) -> Result<bool, SlackError> {
        let res: InfoResponse =
            send(self.get("/conversations.info").query(&InfoRequest { channel })).await?;

        Ok(res.channel.is_member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::auth::SlackAccessToken;
    use mockito::Matcher;

    fn client(srv: &mockito::ServerGuard) -> SlackClient {
        SlackClient::new(srv.url(), SlackAccessToken("foobar".into()))
    }

    #[test]
    fn test_channel_name_display() {
        assert_eq!(ChannelName("general".into()).to_string(), "#general");
    }

    #[test]
    fn test_channel_defaults() {
        let c: Channel = serde_json::from_str(r#"{"id": "C1", "name": "general"}"#).unwrap();
        assert!(!c.is_archived);
        assert!(!c.is_member);
    }

    #[tokio::test]
    async fn test_list_channels() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", "/conversations.list")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("types".into(), CHANNEL_TYPES.into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_body(
                r#"{
                    "ok": true,
                    "channels": [
                        {"id": "C1", "name": "general", "is_archived": false, "is_member": true},
                        {"id": "C2", "name": "old", "is_archived": true, "is_member": false}
                    ],
                    "response_metadata": {
                        "next_cursor": ""
                    }
                }"#,
            )
            .create_async()
            .await;

        let page = client(&srv).list_channels(10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.channels.len(), 2);
        assert!(page.channels[0].id == ChannelId("C1".into()));
        assert!(page.channels[1].is_archived);
        assert!(!page.truncated);
    }

    #[tokio::test]
    async fn test_list_channels_truncated() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("GET", "/conversations.list")
            .match_query(Matcher::Any)
            .with_body(
                r#"{
                    "ok": true,
                    "channels": [{"id": "C1", "name": "general"}],
                    "response_metadata": {
                        "next_cursor": "dGVhbTpDMDYxRkE1UEI="
                    }
                }"#,
            )
            .create_async()
            .await;

        let page = client(&srv).list_channels(1).await.unwrap();

        assert_eq!(page.channels.len(), 1);
        assert!(page.truncated);
    }

    #[tokio::test]
    async fn test_list_channels_error() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("GET", "/conversations.list")
            .match_query(Matcher::Any)
            .with_body(r#"{"ok": false, "error": "missing_scope"}"#)
            .create_async()
            .await;

        let res = client(&srv).list_channels(10).await;

        assert!(matches!(res, Err(SlackError::APIResponseError(e)) if e == "missing_scope"));
    }

    #[tokio::test]
    async fn test_join_channel() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", "/conversations.join")
            .match_body(Matcher::Json(serde_json::json!({"channel": "C1"})))
            .with_body(r#"{"ok": true, "channel": {"id": "C1", "name": "general"}}"#)
            .create_async()
            .await;

        let res = client(&srv).join_channel(&ChannelId("C1".into())).await;

        mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_join_channel_refused() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("POST", "/conversations.join")
            .with_body(r#"{"ok": false, "error": "method_not_supported_for_channel_type"}"#)
            .create_async()
            .await;

        let res = client(&srv).join_channel(&ChannelId("G1".into())).await;

        assert!(matches!(res, Err(SlackError::APIResponseError(_))));
    }

    #[tokio::test]
    async fn test_is_member() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", "/conversations.info")
            .match_query(Matcher::UrlEncoded("channel".into(), "G1".into()))
            .with_body(
                r#"{
                    "ok": true,
                    "channel": {"id": "G1", "name": "secret", "is_member": true}
                }"#,
            )
            .create_async()
            .await;

        let res = client(&srv).is_member(&ChannelId("G1".into())).await.unwrap();

        mock.assert_async().await;
        assert!(res);
    }
}
