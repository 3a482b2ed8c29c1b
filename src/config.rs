//! Runtime configuration, read from environment variables.
//!
//! | Variable          | Default                 |
//! | ----------------- | ----------------------- |
//! | `SLACK_API_TOKEN` | required                |
//! | `SLACK_API_BASE`  | `https://slack.com/api` |
//! | `CHANNEL_LIMIT`   | `100`                   |
//! | `HISTORY_LIMIT`   | `100`                   |
//! | `JOIN_CHANNELS`   | `false`                 |

use crate::{
    error::Fatal,
    slack::{
        api::API_BASE,
        auth::{load_token, SlackAccessToken},
    },
};
use url::Url;

/// Slack rejects page sizes above this for both channels and history.
const MAX_LIMIT: u16 = 1000;

const DEFAULT_LIMIT: u16 = 100;

pub struct Config {
    pub token: SlackAccessToken,
    pub base_url: Url,
    /// How many channels to enumerate. Only one page is requested.
    pub channel_limit: u16,
    /// How many recent messages to read per channel.
    pub history_limit: u16,
    /// Join channels before reading them, skipping archived ones.
    pub join_channels: bool,
}

impl Config {
    /// Build a config from any source of variables, usually `std::env::var`.
    /// The token is checked first so that its absence is reported ahead of
    /// anything else.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Fatal>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = load_token(&lookup).ok_or(Fatal::MissingToken)?;

        let base_url = match lookup("SLACK_API_BASE") {
            None => Url::parse(API_BASE).map_err(|_| Fatal::InvalidConfig {
                var: "SLACK_API_BASE",
                value: API_BASE.into(),
            })?,
            Some(x) => Url::parse(&x).map_err(|_| Fatal::InvalidConfig {
                var: "SLACK_API_BASE",
                value: x,
            })?,
        };

        Ok(Config {
            token,
            base_url,
            channel_limit: parse_limit("CHANNEL_LIMIT", lookup("CHANNEL_LIMIT"))?,
            history_limit: parse_limit("HISTORY_LIMIT", lookup("HISTORY_LIMIT"))?,
            join_channels: parse_flag("JOIN_CHANNELS", lookup("JOIN_CHANNELS"))?,
        })
    }

    /// The API base in the form [crate::slack::api::SlackClient] expects.
    pub fn api_base(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_owned()
    }
}

fn parse_limit(var: &'static str, raw: Option<String>) -> Result<u16, Fatal> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LIMIT);
    };

    match raw.trim().parse::<u16>() {
        Ok(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
        _ => Err(Fatal::InvalidConfig { var, value: raw }),
    }
}

fn parse_flag(var: &'static str, raw: Option<String>) -> Result<bool, Fatal> {
    let Some(raw) = raw else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Fatal::InvalidConfig { var, value: raw }),
    }
}
