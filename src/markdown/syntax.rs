//! Syntax Highlighting Module
//!
//! Wraps syntect for three consumers: fenced code blocks in the preview,
//! the Markdown source in the editor, and fenced code blocks in exported HTML.
//!
//! # Example
//! ```ignore
//! use crate::markdown::syntax::get_highlighter;
//!
//! let lines = get_highlighter().highlight_code("fn main() {}", "rust", Theme::Dark);
//! ```

use crate::config::Theme;
use eframe::egui::{text::LayoutJob, Color32, FontId, RichText, TextFormat};
use log::{debug, warn};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme as SyntectTheme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Syntect theme used with the dark UI theme
pub const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

/// Syntect theme used with the light UI theme
pub const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";

// ─────────────────────────────────────────────────────────────────────────────
// Highlighted Segment
// ─────────────────────────────────────────────────────────────────────────────

/// A segment of highlighted text with its associated color.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedSegment {
    /// The text content of this segment
    pub text: String,
    /// Foreground color for this segment
    pub foreground: Color32,
    /// Whether this segment should be bold
    pub bold: bool,
    /// Whether this segment should be italic
    pub italic: bool,
    /// Whether this segment should be underlined
    pub underline: bool,
}

impl HighlightedSegment {
    /// Create a new highlighted segment.
    pub fn new(text: impl Into<String>, foreground: Color32) -> Self {
        Self {
            text: text.into(),
            foreground,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Convert this segment to egui RichText with the specified font size.
    pub fn to_rich_text(&self, font_size: f32) -> RichText {
        let mut rich_text = RichText::new(&self.text)
            .color(self.foreground)
            .font(FontId::monospace(font_size));

        if self.bold {
            rich_text = rich_text.strong();
        }
        if self.italic {
            rich_text = rich_text.italics();
        }
        if self.underline {
            rich_text = rich_text.underline();
        }

        rich_text
    }
}

/// A line of highlighted segments.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedLine {
    /// The segments that make up this line, line ending included
    pub segments: Vec<HighlightedSegment>,
}

impl HighlightedLine {
    pub fn new(segments: Vec<HighlightedSegment>) -> Self {
        Self { segments }
    }

    /// Create an unhighlighted line with a single segment.
    pub fn plain(text: &str, color: Color32) -> Self {
        Self {
            segments: vec![HighlightedSegment::new(text, color)],
        }
    }

    /// Concatenated text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Syntax Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Syntax highlighter that caches syntect sets for performance.
pub struct SyntaxHighlighter {
    /// Loaded syntax definitions
    syntax_set: SyntaxSet,
    /// Loaded color themes
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Load the syntaxes and themes bundled with syntect.
    ///
    /// This is expensive; use [`get_highlighter`] for the shared instance.
    pub fn new() -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    /// Syntect theme matching the UI theme.
    ///
    /// Returns `None` only if syntect's bundled themes are missing.
    pub fn theme_for(&self, theme: Theme) -> Option<&SyntectTheme> {
        let name = if theme.is_dark() {
            DEFAULT_DARK_THEME
        } else {
            DEFAULT_LIGHT_THEME
        };
        self.theme_set
            .themes
            .get(name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Default text color of the syntect theme.
    pub fn foreground(&self, theme: Theme) -> Color32 {
        self.theme_for(theme)
            .and_then(|t| t.settings.foreground)
            .map(syntect_to_egui_color)
            .unwrap_or(if theme.is_dark() {
                Color32::LIGHT_GRAY
            } else {
                Color32::DARK_GRAY
            })
    }

    /// Background color of the syntect theme.
    pub fn background(&self, theme: Theme) -> Option<Color32> {
        self.theme_for(theme)
            .and_then(|t| t.settings.background)
            .map(syntect_to_egui_color)
    }

    /// Highlight code in the given language.
    ///
    /// Every character of `code` appears in exactly one segment, line endings
    /// included. Unknown languages come back as single plain segments.
    pub fn highlight_code(&self, code: &str, language: &str, theme: Theme) -> Vec<HighlightedLine> {
        let default_color = self.foreground(theme);
        let plain = || {
            LinesWithEndings::from(code)
                .map(|line| HighlightedLine::plain(line, default_color))
                .collect()
        };

        let (Some(syntax), Some(syntect_theme)) =
            (self.find_syntax_for_language(language), self.theme_for(theme))
        else {
            debug!("No syntax found for language: {}", language);
            return plain();
        };

        let mut highlighter = HighlightLines::new(syntax, syntect_theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let segments = ranges
                        .into_iter()
                        .map(|(style, text)| style_to_segment(style, text))
                        .collect();
                    lines.push(HighlightedLine::new(segments));
                }
                Err(e) => {
                    warn!("Failed to highlight line: {}", e);
                    lines.push(HighlightedLine::plain(line, default_color));
                }
            }
        }

        lines
    }

    /// Highlight code into an egui layout job, preserving the exact text.
    pub fn highlight_to_layout_job(
        &self,
        code: &str,
        language: &str,
        theme: Theme,
        font_id: FontId,
    ) -> LayoutJob {
        let mut job = LayoutJob::default();
        for line in self.highlight_code(code, language, theme) {
            for segment in line.segments {
                let mut format = TextFormat::simple(font_id.clone(), segment.foreground);
                format.italics = segment.italic;
                if segment.underline {
                    format.underline = eframe::egui::Stroke::new(1.0, segment.foreground);
                }
                job.append(&segment.text, 0.0, format);
            }
        }
        job
    }

    /// Highlight code into a standalone `<pre>` block with inline styles.
    ///
    /// Unknown languages are escaped and wrapped without colors.
    pub fn highlight_to_html(&self, code: &str, language: &str, theme: Theme) -> String {
        let (Some(syntax), Some(syntect_theme)) =
            (self.find_syntax_for_language(language), self.theme_for(theme))
        else {
            return format!("<pre><code>{}</code></pre>\n", escape_html(code));
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, syntect_theme) {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to highlight {} block as HTML: {}", language, e);
                format!("<pre><code>{}</code></pre>\n", escape_html(code))
            }
        }
    }

    /// Find syntax definition for a language identifier.
    ///
    /// Tries a table of common aliases, then extension, then name.
    fn find_syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lang_lower = language.to_lowercase();

        let extension = match lang_lower.as_str() {
            "rust" | "rs" => "rs",
            "python" | "py" => "py",
            "javascript" | "js" | "jsx" => "js",
            "typescript" | "ts" | "tsx" => "ts",
            "c" => "c",
            "cpp" | "c++" | "cxx" => "cpp",
            "csharp" | "c#" | "cs" => "cs",
            "java" => "java",
            "go" | "golang" => "go",
            "ruby" | "rb" => "rb",
            "php" => "php",
            "html" | "htm" => "html",
            "css" => "css",
            "json" => "json",
            "yaml" | "yml" => "yaml",
            "xml" => "xml",
            "markdown" | "md" => "md",
            "sql" => "sql",
            "shell" | "sh" | "bash" | "zsh" => "sh",
            "lua" => "lua",
            "diff" | "patch" => "diff",
            other => other,
        };

        if let Some(syntax) = self.syntax_set.find_syntax_by_extension(extension) {
            return Some(syntax);
        }

        if let Some(syntax) = self.syntax_set.find_syntax_by_name(language) {
            return Some(syntax);
        }

        self.syntax_set
            .syntaxes()
            .iter()
            .find(|syntax| syntax.name.to_lowercase() == lang_lower)
    }

    /// Whether a fence language is known to syntect.
    pub fn supports_language(&self, language: &str) -> bool {
        self.find_syntax_for_language(language).is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert syntect Color to egui Color32.
pub fn syntect_to_egui_color(color: syntect::highlighting::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn style_to_segment(style: Style, text: &str) -> HighlightedSegment {
    HighlightedSegment {
        text: text.to_string(),
        foreground: syntect_to_egui_color(style.foreground),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Highlighter Instance
// ─────────────────────────────────────────────────────────────────────────────

static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();

/// Get or create the global syntax highlighter.
pub fn get_highlighter() -> &'static SyntaxHighlighter {
    HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
