//! Native file dialogs using the rfd crate

use rfd::FileDialog;
use std::path::PathBuf;

/// Extensions offered when opening or saving Markdown.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// File name proposed when downloading the document.
pub const DEFAULT_MARKDOWN_NAME: &str = "documento.md";
/// File name proposed when exporting HTML.
pub const DEFAULT_HTML_NAME: &str = "documento.html";

/// Pick a Markdown file to load. `None` if cancelled.
pub fn open_markdown_dialog(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("Markdown", MARKDOWN_EXTENSIONS)
        .pick_file()
}

/// Choose where to save the document. `None` if cancelled.
pub fn save_markdown_dialog(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("Markdown", MARKDOWN_EXTENSIONS)
        .set_file_name(DEFAULT_MARKDOWN_NAME)
        .save_file()
}

/// Choose where to export the HTML page. `None` if cancelled.
pub fn save_html_dialog(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("HTML", HTML_EXTENSIONS)
        .set_file_name(DEFAULT_HTML_NAME)
        .save_file()
}
