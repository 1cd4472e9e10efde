pub mod config;
pub mod output;
pub mod replay;

pub use config::CliConfig;
pub use output::{Snapshot, SnapshotRenderer, TimelineLine};
pub use replay::{build_runtime, read_capture, replay};
