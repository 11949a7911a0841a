//! Typed preferences stored in the key-value store
//!
//! Slot names are shared with every build of the editor, so they never change.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Storage Keys
// ─────────────────────────────────────────────────────────────────────────────

/// Document text, rewritten on every edit
pub const CONTENT_KEY: &str = "markdown_editor_content";
/// UI language code
pub const LANGUAGE_KEY: &str = "app_lang";
/// `light` or `dark`
pub const THEME_KEY: &str = "app_theme";
/// Set to `"1"` the first time the user has typed something real
pub const USED_ONCE_KEY: &str = "editor_used_once";
/// `"1"` or `"0"`
pub const SYNC_SCROLL_KEY: &str = "sync_scroll";
/// JSON-encoded [`WindowSize`]
pub const WINDOW_SIZE_KEY: &str = "window_size";

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything unrecognized is the default theme.
    pub fn from_stored(value: &str) -> Self {
        match value.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Toolbar icon: shows what the button switches to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions restored at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl WindowSize {
    pub const MIN_WIDTH: f32 = 480.0;
    pub const MIN_HEIGHT: f32 = 320.0;

    /// Parse a stored value, clamping to usable dimensions.
    pub fn from_stored(value: &str) -> Option<Self> {
        let mut size: WindowSize = serde_json::from_str(value).ok()?;
        if !size.width.is_finite() || !size.height.is_finite() {
            return None;
        }
        size.width = size.width.max(Self::MIN_WIDTH);
        size.height = size.height.max(Self::MIN_HEIGHT);
        Some(size)
    }

    pub fn to_stored(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            maximized: false,
        }
    }
}

/// Stored representation of a boolean flag.
pub fn flag_to_stored(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Parse a stored boolean flag, using `default` when absent or unknown.
pub fn flag_from_stored(value: Option<&str>, default: bool) -> bool {
    match value {
        Some("1") | Some("true") => true,
        Some("0") | Some("false") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_stored_roundtrip() {
        assert_eq!(Theme::from_stored(Theme::Dark.as_str()), Theme::Dark);
        assert_eq!(Theme::from_stored(Theme::Light.as_str()), Theme::Light);
    }

    #[test]
    fn test_unknown_theme_is_light() {
        assert_eq!(Theme::from_stored("sepia"), Theme::Light);
        assert_eq!(Theme::from_stored(""), Theme::Light);
    }

    #[test]
    fn test_theme_toggle_and_icon() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle_icon(), "🌙");
        assert!(Theme::Dark.is_dark());
    }

    #[test]
    fn test_theme_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_window_size_clamped() {
        let size = WindowSize::from_stored(r#"{"width": 100.0, "height": 2000.0}"#).unwrap();
        assert_eq!(size.width, WindowSize::MIN_WIDTH);
        assert_eq!(size.height, 2000.0);
        assert!(!size.maximized);
    }

    #[test]
    fn test_window_size_invalid() {
        assert_eq!(WindowSize::from_stored("not json"), None);
        let stored = WindowSize::default().to_stored();
        assert_eq!(WindowSize::from_stored(&stored), Some(WindowSize::default()));
    }

    #[test]
    fn test_flags() {
        assert!(flag_from_stored(Some(flag_to_stored(true)), false));
        assert!(!flag_from_stored(Some("0"), true));
        assert!(flag_from_stored(None, true));
        assert!(!flag_from_stored(Some("maybe"), false));
    }
}
