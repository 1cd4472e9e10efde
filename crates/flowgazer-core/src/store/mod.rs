pub mod event_store;
pub mod indices;
pub mod profile_store;
pub mod verify;

pub use event_store::{EventStore, ReactionCount, StoreStats};
pub use indices::EventKey;
pub use verify::{AcceptAll, NostrVerifier, SignatureVerifier};
