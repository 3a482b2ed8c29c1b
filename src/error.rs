use crate::slack::{auth::TOKEN_VAR, error::SlackError};
use std::{fmt, io};

/// Sum type representing every condition that ends a run early. Anything
/// that goes wrong for an individual channel is not one of these; see
/// [crate::pipeline::ChannelOutcome].
#[derive(Debug)]
pub enum Fatal {
    MissingToken,
    InvalidConfig { var: &'static str, value: String },
    Authentication(SlackError),
    ChannelList(SlackError),
    Output(io::Error),
}

impl From<io::Error> for Fatal {
    fn from(e: io::Error) -> Self {
        Fatal::Output(e)
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Fatal::MissingToken => format!("${} must be set", TOKEN_VAR),
            Fatal::InvalidConfig { var, value } => format!("Invalid ${}: {:?}", var, value),
            Fatal::Authentication(e) => format!("Authentication failed: {}", e),
            Fatal::ChannelList(e) => format!("Could not list channels: {}", e),
            Fatal::Output(e) => format!("Could not write report: {}", e),
        };

        write!(f, "{}", x)
    }
}
