use crate::models::Event;
use nostr_sdk::{Event as NostrEvent, JsonUtil};

/// Signature check applied before an event is accepted.
pub trait SignatureVerifier {
    fn verify(&self, event: &Event) -> bool;
}

/// Verifies id and schnorr signature with nostr-sdk.
#[derive(Debug, Default, Clone, Copy)]
pub struct NostrVerifier;

impl SignatureVerifier for NostrVerifier {
    fn verify(&self, event: &Event) -> bool {
        let Ok(json) = serde_json::to_string(event) else {
            return false;
        };
        match NostrEvent::from_json(json) {
            Ok(parsed) => parsed.verify().is_ok(),
            Err(_) => false,
        }
    }
}

/// Accepts everything. For replaying fixtures that were already verified.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl SignatureVerifier for AcceptAll {
    fn verify(&self, _event: &Event) -> bool {
        true
    }
}
