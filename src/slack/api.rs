//! Type definitions and helpers for the Slack API.

use super::{auth::*, error::SlackError};
use serde::{de::DeserializeOwned, Deserialize};

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A client for the Slack Web API, bound to a single access token for the
/// duration of a run.
pub struct SlackClient {
    http: reqwest::Client,
    base: String,
    token: SlackAccessToken,
}

impl SlackClient {
    /// `base` is the API root without a trailing slash, for example
    /// [API_BASE]. Tests point this at a mock server instead.
    pub fn new(base: String, token: SlackAccessToken) -> Self {
        SlackClient {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Create a GET request to any Slack API endpoint, handling authentication.
    pub fn get<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .get(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub fn post<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .post(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }
}

/// Send a request and decode Slack's response envelope.
pub async fn send<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, SlackError> {
    let res: APIResult<T> = req.send().await?.json().await?;

    match res {
        APIResult::Ok(x) => Ok(x),
        APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channels": []
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too, so
// that an error body can never be mistaken for a success whose other fields
// all happen to be optional.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}
