use crate::campaign::TaskKind;
use engage_types::{AccountAddress, CampaignId};

/// Pluggable proof validation.
///
/// Implementations are pure predicates: no state mutation, no failure mode.
/// Malformed input yields `false`, never an error. The ledger consults the
/// verifier only after its own shape checks (non-empty proof) have passed.
pub trait ProofVerifier: Send + Sync {
    fn verify(
        &self,
        proof: &str,
        kind: TaskKind,
        campaign: CampaignId,
        claimant: AccountAddress,
    ) -> bool;
}

pub const DEFAULT_PROOF_MIN_CHARS: usize = 10;

/// Placeholder policy: accepts any proof strictly longer than `min_chars`
/// characters.
///
/// This is not an attestation of task legitimacy. Production deployments are
/// expected to inject a real verifier (oracle lookup, signature check,
/// manual-review attestation) in its place.
pub struct MinLengthVerifier {
    min_chars: usize,
}

impl MinLengthVerifier {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl Default for MinLengthVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_PROOF_MIN_CHARS)
    }
}

impl ProofVerifier for MinLengthVerifier {
    fn verify(
        &self,
        proof: &str,
        _kind: TaskKind,
        _campaign: CampaignId,
        _claimant: AccountAddress,
    ) -> bool {
        proof.chars().count() > self.min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> (CampaignId, AccountAddress) {
        let owner = AccountAddress::from_bytes([1; 32]);
        (CampaignId::derive(&owner, 0, 0), AccountAddress::from_bytes([2; 32]))
    }

    #[test]
    fn test_default_threshold() {
        let verifier = MinLengthVerifier::default();
        let (campaign, claimant) = context();

        assert!(!verifier.verify("short", TaskKind::Follow, campaign, claimant));
        // Exactly 10 characters is still too short.
        assert!(!verifier.verify("abcdefghij", TaskKind::Follow, campaign, claimant));
        assert!(verifier.verify("abcdefghijk", TaskKind::Follow, campaign, claimant));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let verifier = MinLengthVerifier::new(3);
        let (campaign, claimant) = context();
        // Four multi-byte characters pass a three-character threshold.
        assert!(verifier.verify("éééé", TaskKind::Retweet, campaign, claimant));
    }
}
