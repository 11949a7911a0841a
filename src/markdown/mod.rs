//! Markdown parsing, rendering and preview
//!
//! Uses comrak, a CommonMark + GFM compatible parser, with syntect for
//! code highlighting.
//!
//! # Features
//! - Parse markdown into an owned AST for the preview pane
//! - Render markdown to an HTML fragment or a standalone page
//! - GitHub Flavored Markdown: tables, task lists, strikethrough, autolinks
//! - Single newlines become line breaks
//!
//! # Example
//! ```ignore
//! use crate::markdown::{render_html, PreviewPane};
//!
//! let html = render_html("# Hello\n\nThis is **bold** text.", Theme::Light);
//!
//! let mut preview = PreviewPane::new();
//! preview.update(&text, revision);
//! preview.show(ui, theme, &mut slot);
//! ```

mod parser;
mod render;
pub mod syntax;
mod view;

pub use render::{render_html, render_html_document};
pub use view::PreviewPane;
