//! A minimal, read-mostly client for the parts of Slack's Web API needed to
//! survey emoji reactions: identity, channels, membership, and history.
//!
//! See [api::SlackClient].

pub mod api;
pub mod auth;
pub mod channel;
pub mod error;
pub mod history;
