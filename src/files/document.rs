//! Reading and writing Markdown documents

use super::dialogs::MARKDOWN_EXTENSIONS;
use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Whether `path` has a Markdown extension (case-insensitive).
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Read a UTF-8 document. Invalid UTF-8 is an error, never replaced.
pub fn read_document(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Read {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

/// Read a dropped file, refusing anything that is not Markdown.
pub fn read_dropped_document(path: &Path) -> Result<String> {
    if !is_markdown_path(path) {
        return Err(Error::Application(format!(
            "'{}' is not a Markdown file",
            path.display()
        )));
    }
    read_document(path)
}

/// Write `text` to `path`, replacing any existing file.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_markdown_path() {
        assert!(is_markdown_path(Path::new("notes.md")));
        assert!(is_markdown_path(Path::new("README.MD")));
        assert!(is_markdown_path(Path::new("a/b.markdown")));
        assert!(!is_markdown_path(Path::new("notes.txt")));
        assert!(!is_markdown_path(Path::new("md")));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documento.md");

        write_document(&path, "# Hola\n\n¿Qué tal?").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# Hola\n\n¿Qué tal?");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_document(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_read_invalid_utf8_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.md");
        fs::write(&path, [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let err = read_document(&path).unwrap_err();
        match err {
            Error::FileRead { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_dropped_non_markdown_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image.png");
        fs::write(&path, "not markdown").unwrap();

        assert!(matches!(
            read_dropped_document(&path),
            Err(Error::Application(_))
        ));
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = write_document(&dir.path().join("no/such/dir.md"), "x").unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }
}
