pub mod event;
pub mod filter;
pub mod profile;
pub mod tab;

pub use event::{is_hex32, Event};
pub use filter::{FilterError, QueryFilter};
pub use profile::{Profile, ProfileError};
pub use tab::{Cursor, Tab, UnknownTab};
