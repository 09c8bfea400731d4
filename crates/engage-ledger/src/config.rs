use crate::events::DEFAULT_EVENT_BUFFER;
use crate::verifier::DEFAULT_PROOF_MIN_CHARS;
use serde::{Deserialize, Serialize};

/// Tunables for an in-process ledger deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Character threshold for the default placeholder verifier.
    pub proof_min_chars: usize,
    /// Broadcast buffer size for the notification bus.
    pub event_buffer: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            proof_min_chars: DEFAULT_PROOF_MIN_CHARS,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.proof_min_chars, 10);
        assert_eq!(config.event_buffer, 256);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: LedgerConfig = serde_json::from_str(r#"{"proof_min_chars": 16}"#).unwrap();
        assert_eq!(config.proof_min_chars, 16);
        assert_eq!(config.event_buffer, 256);
    }
}
