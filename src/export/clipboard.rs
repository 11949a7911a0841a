//! Clipboard operations using the arboard crate

use crate::config::Theme;
use crate::error::{Error, Result};
use crate::markdown::render_html;
use arboard::Clipboard;
use log::info;

/// Put the rendered HTML of `markdown` on the clipboard.
///
/// Apps that understand HTML paste it formatted; others get the Markdown
/// source as the plain-text alternative.
pub fn copy_html_to_clipboard(markdown: &str, theme: Theme) -> Result<()> {
    let html = render_html(markdown, theme);
    let mut clipboard = Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard
        .set_html(html.as_str(), Some(markdown))
        .map_err(|e| Error::Clipboard(e.to_string()))?;

    info!("Copied {} bytes of HTML to the clipboard", html.len());
    Ok(())
}

// A display server is needed to open the clipboard, so only the error
// mapping is covered here.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_message() {
        let err = Error::Clipboard("no display".to_string());
        assert_eq!(err.to_string(), "Clipboard error: no display");
    }
}
