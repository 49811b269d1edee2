//! Event input type.

use crate::error::{ModerationError, Result};
use serde::{Deserialize, Serialize};

/// One unit of incoming content to classify.
///
/// Read-only input to matching; the engine never mutates an event and
/// evaluates each one independently of every other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Caller-assigned identifier echoed back in the result.
    pub id: String,
    /// Text to scan.
    pub text: String,
    /// Region the event originates from, matched against rule targeting.
    pub region: String,
    /// Event time (unix seconds), matched against rule validity windows.
    pub timestamp: i64,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        region: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            region: region.into(),
            timestamp,
        }
    }

    /// Build an event from raw bytes, for callers ingesting wire data.
    /// Invalid UTF-8 is an `InvalidTextEncoding` error.
    pub fn from_utf8(
        id: impl Into<String>,
        text: &[u8],
        region: impl Into<String>,
        timestamp: i64,
    ) -> Result<Self> {
        let text = std::str::from_utf8(text)
            .map_err(|e| ModerationError::InvalidTextEncoding(e.to_string()))?;
        Ok(Self::new(id, text, region, timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_utf8_valid() {
        let event = Event::from_utf8("e1", "hello".as_bytes(), "us", 100).unwrap();
        assert_eq!(event.text, "hello");
        assert_eq!(event.id, "e1");
    }

    #[test]
    fn test_from_utf8_invalid() {
        let err = Event::from_utf8("e1", &[0xff, 0xfe], "us", 100).unwrap_err();
        assert!(matches!(err, ModerationError::InvalidTextEncoding(_)));
    }
}
