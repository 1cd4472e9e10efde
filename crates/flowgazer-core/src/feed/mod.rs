pub mod membership;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod router;
pub mod self_feed;

pub use membership::{belongs_to, is_boundary_eligible, tab_kinds, target_tabs};
pub use pipeline::ViewOptions;
pub use render::{NullRenderer, RenderFrame, RenderScheduler, Renderer};
pub use router::{FeedRouter, TabState};
pub use self_feed::SelfFeedCache;
