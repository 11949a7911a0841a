//! egui Visuals built from a palette

use super::ThemeColors;
use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

/// Corner radius for widgets
const WIDGET_ROUNDING: f32 = 4.0;
/// Corner radius for windows and popups
const WINDOW_ROUNDING: f32 = 8.0;

/// Create egui Visuals for a palette.
///
/// Starts from egui's own light or dark defaults so that anything not
/// overridden here still fits the mode.
pub fn create_visuals(colors: &ThemeColors) -> Visuals {
    let dark = colors.is_dark();
    let mut visuals = if dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    // Window & panel background
    visuals.panel_fill = colors.base.background;
    visuals.window_fill = colors.base.background;
    visuals.extreme_bg_color = colors.base.background_tertiary;
    visuals.faint_bg_color = colors.base.background_secondary;
    visuals.code_bg_color = colors.editor.code_block_bg;

    visuals.override_text_color = None;
    visuals.warn_fg_color = colors.ui.warning;
    visuals.error_fg_color = colors.ui.error;
    visuals.hyperlink_color = colors.text.link;

    visuals.selection.bg_fill = colors.base.selected;
    visuals.selection.stroke = Stroke::new(1.0, colors.ui.accent);

    let rounding = Rounding::same(WIDGET_ROUNDING);

    visuals.widgets.noninteractive.bg_fill = colors.base.background_secondary;
    visuals.widgets.noninteractive.weak_bg_fill = colors.base.background_tertiary;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.base.border_subtle);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text.primary);
    visuals.widgets.noninteractive.rounding = rounding;

    visuals.widgets.inactive.bg_fill = colors.base.background_secondary;
    visuals.widgets.inactive.weak_bg_fill = colors.base.background_tertiary;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.base.border);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text.secondary);
    visuals.widgets.inactive.rounding = rounding;

    visuals.widgets.hovered.bg_fill = colors.base.hover;
    visuals.widgets.hovered.weak_bg_fill = colors.base.hover;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, colors.text.primary);
    visuals.widgets.hovered.rounding = rounding;

    visuals.widgets.active.bg_fill = colors.ui.accent;
    visuals.widgets.active.weak_bg_fill = colors.base.selected;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, colors.ui.accent_hover);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = rounding;

    visuals.widgets.open.bg_fill = colors.base.selected;
    visuals.widgets.open.weak_bg_fill = colors.base.selected;
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, colors.text.primary);
    visuals.widgets.open.rounding = rounding;

    visuals.window_rounding = Rounding::same(WINDOW_ROUNDING);
    visuals.window_stroke = Stroke::new(1.0, colors.base.border);
    visuals.menu_rounding = rounding;
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 12.0,
        spread: 0.0,
        color: Color32::from_black_alpha(if dark { 80 } else { 30 }),
    };

    visuals.striped = true;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    visuals.dark_mode = dark;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flag_follows_palette() {
        assert!(!create_visuals(&ThemeColors::light()).dark_mode);
        assert!(create_visuals(&ThemeColors::dark()).dark_mode);
    }

    #[test]
    fn test_panel_fill_is_palette_background() {
        let colors = ThemeColors::dark();
        assert_eq!(create_visuals(&colors).panel_fill, colors.base.background);
    }

    #[test]
    fn test_selection_visible() {
        let visuals = create_visuals(&ThemeColors::light());
        assert_ne!(visuals.selection.bg_fill, visuals.panel_fill);
    }
}
