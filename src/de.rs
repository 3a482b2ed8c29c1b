//! Deserialization helpers for Slack's response envelope.

use serde::de::{Deserialize, Deserializer, Error};

/// Accept a boolean only if it equals `expected`.
fn exactly<'a, D>(deserializer: D, expected: bool) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    bool::deserialize(deserializer).and_then(|b| {
        if b == expected {
            Ok(b)
        } else {
            Err(Error::custom(format!("invalid bool: {}", b)))
        }
    })
}

/// For the `ok` field of successful responses.
pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, true)
}

/// For the `ok` field of error responses.
pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    exactly(deserializer, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct Success {
        #[serde(deserialize_with = "only_true")]
        ok: bool,
    }

    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct Failure {
        #[serde(deserialize_with = "only_false")]
        ok: bool,
        error: String,
    }

    #[test]
    fn test_only_true() {
        assert_eq!(
            serde_json::from_str::<Success>(r#"{"ok": true}"#).unwrap(),
            Success { ok: true },
        );

        assert!(serde_json::from_str::<Success>(r#"{"ok": false}"#).is_err());
        assert!(serde_json::from_str::<Success>(r#"{"ok": "true"}"#).is_err());
    }

    #[test]
    fn test_only_false() {
        assert_eq!(
            serde_json::from_str::<Failure>(r#"{"ok": false, "error": "invalid_auth"}"#).unwrap(),
            Failure {
                ok: false,
                error: "invalid_auth".into()
            },
        );

        assert!(serde_json::from_str::<Failure>(r#"{"ok": true, "error": "x"}"#).is_err());
    }
}
