//! Helpers around Slack's use of OAuth Bearer Authentication, and verifying
//! that a token is any good before doing real work with it.

use super::{
    api::{send, SlackClient},
    error::SlackError,
};
use serde::Deserialize;

/// The environment variable holding the access token.
pub const TOKEN_VAR: &str = "SLACK_API_TOKEN";

/// A newtype wrapper around Slack access tokens.
#[derive(PartialEq, Eq, Clone)]
pub struct SlackAccessToken(pub String);

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
///
/// ```
/// let token = SlackAccessToken("xoxb-foo".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
/// ```
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}

/// Read the access token via `lookup`. A value that's present but blank is
/// treated the same as one that's absent.
pub fn load_token<F>(lookup: F) -> Option<SlackAccessToken>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(TOKEN_VAR)
        .map(|x| x.trim().to_owned())
        .filter(|x| !x.is_empty())
        .map(SlackAccessToken)
}

/// Who the token belongs to, as reported by Slack.
///
/// <https://api.slack.com/methods/auth.test#examples>
#[derive(Deserialize)]
pub struct Identity {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    pub user: String,
    pub user_id: String,
    #[serde(default)]
    pub team: Option<String>,
}

impl SlackClient {
    /// Check the token against Slack, returning the identity behind it.
    pub async fn auth_test(&self) -> Result<Identity, SlackError> {
        send(self.post("/auth.test")).await
    }
}
