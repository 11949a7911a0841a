//! Source editor for Markdown Express
//!
//! The editable text pane and the helpers around it: line numbers,
//! document statistics, and the deferred re-measure after a layout change.

mod line_numbers;
mod remeasure;
mod stats;
mod widget;

pub use line_numbers::count_lines;
pub use remeasure::RemeasureTimer;
pub use stats::TextStats;
pub use widget::{EditorOutput, EditorPane};
