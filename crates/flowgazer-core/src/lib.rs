pub mod config;
pub mod constants;
pub mod feed;
pub mod models;
pub mod relay;
pub mod runtime;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{FeedConfig, SelfExclusion};
pub use feed::{FeedRouter, NullRenderer, RenderFrame, Renderer, ViewOptions};
pub use models::{Cursor, Event, Profile, QueryFilter, Tab};
pub use relay::{ProfileRequester, RelayMessage, RelayMessageError, Subscription, Transport};
pub use runtime::FeedRuntime;
pub use store::{AcceptAll, EventStore, NostrVerifier, SignatureVerifier, StoreStats};
