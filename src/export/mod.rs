//! Document export: standalone HTML files and HTML on the clipboard

mod clipboard;

pub use clipboard::copy_html_to_clipboard;

use crate::config::Theme;
use crate::error::Result;
use crate::files::write_document;
use crate::markdown::render_html_document;
use std::path::Path;

/// Page title used when the document has no heading.
const FALLBACK_TITLE: &str = "Markdown Express";

/// Title for an exported page: the text of the first ATX heading.
pub fn document_title(markdown: &str) -> String {
    markdown
        .lines()
        .map(str::trim_start)
        .find_map(|line| {
            let rest = line.trim_start_matches('#');
            let level = line.len() - rest.len();
            ((1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' ')))
                .then(|| rest.trim().trim_end_matches('#').trim())
        })
        .filter(|title| !title.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_string()
}

/// Write `markdown` as a standalone themed HTML page.
pub fn export_html_file(path: &Path, markdown: &str, theme: Theme) -> Result<()> {
    let html = render_html_document(markdown, &document_title(markdown), theme);
    write_document(path, &html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_title_from_first_heading() {
        assert_eq!(document_title("intro\n\n## Second level ##\n# First"), "Second level");
        assert_eq!(document_title("   # Indented"), "Indented");
    }

    #[test]
    fn test_title_fallback() {
        assert_eq!(document_title(""), FALLBACK_TITLE);
        assert_eq!(document_title("#hashtag\n####### seven"), FALLBACK_TITLE);
        assert_eq!(document_title("#\n"), FALLBACK_TITLE);
    }

    #[test]
    fn test_export_writes_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documento.html");

        export_html_file(&path, "# Notes\n\nhello", Theme::Light).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Notes</title>"));
        assert!(html.contains("<p>hello</p>"));
    }
}
