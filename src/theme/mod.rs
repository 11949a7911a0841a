//! Theme System for Markdown Express
//!
//! Light and dark palettes for the chrome, the preview and exported HTML.
//! [`ThemeManager`] turns the selected [`Theme`] into egui `Visuals`.
//!
//! # Usage
//!
//! ```ignore
//! let colors = ThemeColors::for_theme(Theme::Dark);
//! ui.label(RichText::new("Hello").color(colors.text.primary));
//! ```
//!
//! [`Theme`]: crate::config::Theme

mod manager;
mod visuals;

pub use manager::ThemeManager;
pub use visuals::create_visuals;

use crate::config::Theme;
use eframe::egui::Color32;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Every color the application draws with, for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Backgrounds and borders
    pub base: BaseColors,
    /// Text in its various roles
    pub text: TextColors,
    /// Rendered markdown elements
    pub editor: EditorThemeColors,
    /// Accent and feedback colors
    pub ui: UiColors,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            editor: EditorThemeColors::light(),
            ui: UiColors::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            editor: EditorThemeColors::dark(),
            ui: UiColors::dark(),
        }
    }

    /// Dark palettes have dark backgrounds.
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Panels and the editor surface
    pub background: Color32,
    /// Toolbar, status bar and gutter
    pub background_secondary: Color32,
    /// Text input fill
    pub background_tertiary: Color32,
    pub border: Color32,
    pub border_subtle: Color32,
    pub hover: Color32,
    pub selected: Color32,
}

impl BaseColors {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            background_secondary: Color32::from_rgb(246, 247, 249),
            background_tertiary: Color32::from_rgb(240, 241, 243),
            border: Color32::from_rgb(208, 215, 222),
            border_subtle: Color32::from_rgb(230, 232, 235),
            hover: Color32::from_rgb(236, 238, 241),
            selected: Color32::from_rgb(221, 235, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(30, 30, 30),
            background_secondary: Color32::from_rgb(37, 37, 38),
            background_tertiary: Color32::from_rgb(45, 45, 45),
            border: Color32::from_rgb(64, 64, 64),
            border_subtle: Color32::from_rgb(50, 50, 50),
            hover: Color32::from_rgb(55, 55, 58),
            selected: Color32::from_rgb(38, 79, 120),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Colors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    /// Line numbers, captions
    pub muted: Color32,
    pub link: Color32,
    /// Inline code
    pub code: Color32,
}

impl TextColors {
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(31, 35, 40),
            secondary: Color32::from_rgb(87, 96, 106),
            muted: Color32::from_rgb(140, 149, 159),
            link: Color32::from_rgb(9, 105, 218),
            code: Color32::from_rgb(207, 34, 46),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(220, 220, 220),
            secondary: Color32::from_rgb(180, 180, 180),
            muted: Color32::from_rgb(125, 125, 125),
            link: Color32::from_rgb(100, 180, 255),
            code: Color32::from_rgb(230, 192, 123),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendered Markdown Colors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorThemeColors {
    pub heading: Color32,
    pub blockquote_border: Color32,
    pub blockquote_text: Color32,
    pub code_block_bg: Color32,
    pub code_block_border: Color32,
    pub horizontal_rule: Color32,
    pub list_marker: Color32,
    pub checkbox: Color32,
    pub table_border: Color32,
    pub table_header_bg: Color32,
}

impl EditorThemeColors {
    pub fn light() -> Self {
        Self {
            heading: Color32::from_rgb(31, 35, 40),
            blockquote_border: Color32::from_rgb(208, 215, 222),
            blockquote_text: Color32::from_rgb(101, 109, 118),
            code_block_bg: Color32::from_rgb(246, 248, 250),
            code_block_border: Color32::from_rgb(216, 222, 228),
            horizontal_rule: Color32::from_rgb(208, 215, 222),
            list_marker: Color32::from_rgb(101, 109, 118),
            checkbox: Color32::from_rgb(9, 105, 218),
            table_border: Color32::from_rgb(208, 215, 222),
            table_header_bg: Color32::from_rgb(246, 248, 250),
        }
    }

    pub fn dark() -> Self {
        Self {
            heading: Color32::from_rgb(100, 180, 255),
            blockquote_border: Color32::from_rgb(80, 80, 80),
            blockquote_text: Color32::from_rgb(180, 180, 180),
            code_block_bg: Color32::from_rgb(43, 48, 59),
            code_block_border: Color32::from_rgb(55, 60, 68),
            horizontal_rule: Color32::from_rgb(80, 80, 80),
            list_marker: Color32::from_rgb(150, 150, 150),
            checkbox: Color32::from_rgb(100, 180, 255),
            table_border: Color32::from_rgb(60, 65, 75),
            table_header_bg: Color32::from_rgb(45, 50, 60),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Colors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl UiColors {
    pub fn light() -> Self {
        Self {
            accent: Color32::from_rgb(0, 120, 212),
            accent_hover: Color32::from_rgb(0, 100, 180),
            success: Color32::from_rgb(40, 167, 69),
            warning: Color32::from_rgb(191, 135, 0),
            error: Color32::from_rgb(220, 53, 69),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: Color32::from_rgb(100, 180, 255),
            accent_hover: Color32::from_rgb(130, 200, 255),
            success: Color32::from_rgb(75, 210, 100),
            warning: Color32::from_rgb(255, 210, 50),
            error: Color32::from_rgb(255, 100, 100),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
