//! Theme Manager for Markdown Express
//!
//! Holds the selected theme and applies it to the egui context when it
//! changes.
//!
//! # Usage
//!
//! ```ignore
//! let mut manager = ThemeManager::new(Theme::Light);
//! manager.apply_if_needed(&ctx);
//!
//! manager.toggle();
//! manager.apply_if_needed(&ctx);
//! ```

use super::{create_visuals, ThemeColors};
use crate::config::Theme;
use eframe::egui::Context;
use log::{debug, info};

/// Tracks the current theme and whether egui has seen it yet.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    current_theme: Theme,
    needs_apply: bool,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            needs_apply: true,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the theme. Takes effect on the next `apply_if_needed`.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.needs_apply = true;
        }
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current_theme.toggle();
        self.set_theme(next);
        next
    }

    pub fn needs_apply(&self) -> bool {
        self.needs_apply
    }

    /// Push the theme's visuals into egui.
    pub fn apply(&mut self, ctx: &Context) {
        ctx.set_visuals(create_visuals(&self.colors()));
        self.needs_apply = false;
        debug!("Applied theme: {:?}", self.current_theme);
    }

    /// Apply only if the theme changed. Returns `true` if applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.needs_apply {
            self.apply(ctx);
            true
        } else {
            false
        }
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors::for_theme(self.current_theme)
    }
}
