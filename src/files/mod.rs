//! File operations: native dialogs and document I/O

pub mod dialogs;
mod document;

pub use document::{read_document, read_dropped_document, write_document};
