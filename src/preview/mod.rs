//! Preview synchronization module
//!
//! Keeps the source pane and the rendered pane scrolled to the same relative
//! depth.

mod pane;
mod sync_scroll;

pub use pane::PaneSlot;
pub use sync_scroll::{MirrorLock, ScrollMirror, ScrollPane, SyncOutcome};
