//! Document statistics for the status bar

use super::count_lines;
use crate::i18n::Translator;

/// Word, character and line counts of a document.
///
/// # Example
///
/// ```ignore
/// let stats = TextStats::from_text("Hello, World!\nBye");
/// assert_eq!(stats.words, 3);
/// assert_eq!(stats.lines, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Runs of non-whitespace characters
    pub words: usize,
    /// Unicode scalar values, whitespace included
    pub characters: usize,
    /// Lines, at least 1
    pub lines: usize,
}

impl TextStats {
    /// Count everything in one pass over the characters.
    pub fn from_text(text: &str) -> Self {
        let mut words = 0;
        let mut characters = 0;
        let mut in_word = false;

        for ch in text.chars() {
            characters += 1;
            if ch.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                words += 1;
            }
        }

        Self {
            words,
            characters,
            lines: count_lines(text),
        }
    }

    /// Localized status line, e.g. "12 words · 80 characters · 3 lines".
    pub fn format(&self, translator: &Translator) -> String {
        format!(
            "{} {} · {} {} · {} {}",
            self.words,
            translator.t("status.words"),
            self.characters,
            translator.t("status.characters"),
            self.lines,
            translator.t("status.lines"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_stats_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(
            stats,
            TextStats {
                words: 0,
                characters: 0,
                lines: 1
            }
        );
    }

    #[test]
    fn test_stats_simple_sentence() {
        let stats = TextStats::from_text("The quick brown fox.");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.characters, 20);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_stats_markdown_document() {
        let stats = TextStats::from_text("# Title\n\n- one\n- two\n");
        assert_eq!(stats.words, 6);
        assert_eq!(stats.lines, 5);
    }

    #[test]
    fn test_stats_only_whitespace() {
        let stats = TextStats::from_text("  \n\t \n");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 6);
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_stats_unicode_counts_chars_not_bytes() {
        let stats = TextStats::from_text("señal 日本");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 8);
    }

    #[test]
    fn test_format_is_localized() {
        let stats = TextStats::from_text("hola mundo");
        assert_eq!(
            stats.format(&Translator::new(Language::En)),
            "2 words · 10 characters · 1 lines"
        );
        assert!(stats
            .format(&Translator::new(Language::Es))
            .starts_with("2 palabras"));
    }
}
