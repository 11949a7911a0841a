//! Source pane: the Markdown text editor
//!
//! A monospace `TextEdit` inside a vertical `ScrollArea`, with a line-number
//! gutter that scrolls along with the text and syntect colouring of the
//! Markdown source. The pane reads and writes its scroll state through a
//! [`PaneSlot`] so the scroll mirror can follow it.

use super::line_numbers::gutter_width;
use crate::config::Theme;
use crate::markdown::syntax::get_highlighter;
use crate::preview::PaneSlot;
use crate::theme::ThemeColors;
use eframe::egui::{
    self,
    text::{CCursor, CCursorRange, LayoutJob},
    FontId, Galley, Key, Modifiers, ScrollArea, TextEdit, Ui,
};
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Spaces inserted by the Tab key.
pub const TAB_SIZE: usize = 4;

const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Result of showing the editor for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOutput {
    /// The text was edited by the user.
    pub changed: bool,
    /// The user scrolled the editor.
    pub scrolled: bool,
}

/// Highlighted layout of the last text seen, minus wrapping.
#[derive(Debug, Default)]
struct LayoutCache {
    key: Option<(u64, Theme)>,
    job: LayoutJob,
}

impl LayoutCache {
    fn job_for(&mut self, text: &str, theme: Theme, font_id: &FontId) -> LayoutJob {
        let key = (hash_text(text), theme);
        if self.key != Some(key) {
            self.job = get_highlighter().highlight_to_layout_job(
                text,
                "markdown",
                theme,
                font_id.clone(),
            );
            self.key = Some(key);
        }
        self.job.clone()
    }

    fn clear(&mut self) {
        self.key = None;
        self.job = LayoutJob::default();
    }
}

fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// The editable source pane.
///
/// Lives as long as the app; the document text itself is passed in on
/// every frame.
///
/// # Example
///
/// ```ignore
/// let output = editor.show(ui, &mut state.text, state.version(), theme, &mut slot);
/// if output.changed {
///     state.text_edited();
/// }
/// ```
#[derive(Debug)]
pub struct EditorPane {
    id: egui::Id,
    font_size: f32,
    show_line_numbers: bool,
    layout_cache: LayoutCache,
}

impl Default for EditorPane {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorPane {
    pub fn new() -> Self {
        Self {
            id: egui::Id::new("source_editor"),
            font_size: DEFAULT_FONT_SIZE,
            show_line_numbers: true,
            layout_cache: LayoutCache::default(),
        }
    }

    /// Drop the cached layout so the next frame lays the text out afresh.
    pub fn invalidate_layout(&mut self) {
        debug!("Editor layout invalidated");
        self.layout_cache.clear();
    }

    /// Show the editor.
    ///
    /// `version` changes whenever `text` was replaced from outside the
    /// editor (import, clear). The `TextEdit` id includes it so egui drops
    /// the widget's cursor state instead of applying it to the new text.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        text: &mut String,
        version: u64,
        theme: Theme,
        slot: &mut PaneSlot,
    ) -> EditorOutput {
        let id = self.id.with(version);
        let font_size = self.font_size;
        let font_id = FontId::monospace(font_size);
        let colors = ThemeColors::for_theme(theme);
        let gutter = if self.show_line_numbers {
            Some(gutter_width(text, font_size))
        } else {
            None
        };

        // Tab indents instead of moving focus
        let has_focus = ui.memory(|m| m.has_focus(id));
        let tab_pressed = has_focus && ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Tab));

        let cache = &mut self.layout_cache;
        let layout_font = font_id.clone();
        let mut layouter = |ui: &Ui, text: &str, wrap_width: f32| -> Arc<Galley> {
            let mut job = cache.job_for(text, theme, &layout_font);
            job.wrap.max_width = wrap_width;
            ui.fonts(|f| f.layout_job(job))
        };

        let mut scroll_area = ScrollArea::vertical()
            .id_source(self.id.with("scroll"))
            .auto_shrink([false, false]);
        if let Some(offset) = slot.take_pending_scroll() {
            scroll_area = scroll_area.vertical_scroll_offset(offset);
        }

        let mut changed = false;
        let scroll_output = scroll_area.show(ui, |ui| {
            ui.horizontal_top(|ui| {
                let gutter_rect = gutter.map(|width| {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(width, ui.available_height()),
                        egui::Sense::hover(),
                    );
                    rect
                });

                let mut output = TextEdit::multiline(text)
                    .id(id)
                    .frame(false)
                    .font(font_id.clone())
                    .desired_width(f32::INFINITY)
                    .lock_focus(true)
                    .layouter(&mut layouter)
                    .show(ui);
                changed = output.response.changed();

                if tab_pressed {
                    if let Some(range) = output.cursor_range {
                        let at = range.primary.ccursor.index;
                        let cursor = insert_at_char(text, at, &" ".repeat(TAB_SIZE));
                        output
                            .state
                            .cursor
                            .set_char_range(Some(CCursorRange::one(CCursor::new(cursor))));
                        output.state.store(ui.ctx(), id);
                        changed = true;
                    }
                }

                if let Some(gutter_rect) = gutter_rect {
                    paint_line_numbers(
                        ui,
                        gutter_rect,
                        &output.galley,
                        output.galley_pos,
                        &colors,
                        font_size,
                    );
                }
            });
        });

        let scrolled = slot.record_output(&scroll_output);
        EditorOutput { changed, scrolled }
    }
}

/// Insert `insert` at char index `at` (clamped to the end). Returns the
/// char index just after the inserted text.
pub fn insert_at_char(text: &mut String, at: usize, insert: &str) -> usize {
    let byte = text
        .char_indices()
        .nth(at)
        .map_or(text.len(), |(byte, _)| byte);
    text.insert_str(byte, insert);
    text[..byte].chars().count() + insert.chars().count()
}

/// Draw one number per logical line, aligned to the first row of the line.
fn paint_line_numbers(
    ui: &Ui,
    gutter_rect: egui::Rect,
    galley: &Galley,
    galley_pos: egui::Pos2,
    colors: &ThemeColors,
    font_size: f32,
) {
    let painter = ui.painter();
    let full = egui::Rect::from_min_max(
        gutter_rect.min,
        egui::pos2(gutter_rect.max.x, gutter_rect.min.y.max(galley_pos.y + galley.size().y)),
    )
    .union(gutter_rect);

    painter.rect_filled(full, 0.0, colors.base.background_secondary);
    painter.line_segment(
        [
            full.right_top() + egui::vec2(-1.0, 0.0),
            full.right_bottom() + egui::vec2(-1.0, 0.0),
        ],
        egui::Stroke::new(1.0, colors.base.border_subtle),
    );

    let font_id = FontId::monospace(font_size);
    let x = gutter_rect.right() - 10.0;
    let mut line = 1usize;
    let mut at_line_start = true;

    for row in &galley.rows {
        if at_line_start {
            painter.text(
                egui::pos2(x, galley_pos.y + row.min_y()),
                egui::Align2::RIGHT_TOP,
                line.to_string(),
                font_id.clone(),
                colors.text.muted,
            );
            at_line_start = false;
        }
        if row.ends_with_newline {
            line += 1;
            at_line_start = true;
        }
    }

    // Empty text can lay out with no rows at all
    if at_line_start {
        let y = galley
            .rows
            .last()
            .map_or(galley_pos.y, |row| galley_pos.y + row.max_y());
        painter.text(
            egui::pos2(x, y),
            egui::Align2::RIGHT_TOP,
            line.to_string(),
            font_id,
            colors.text.muted,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::ScrollPane;

    #[test]
    fn test_insert_at_char_ascii() {
        let mut text = "ab".to_string();
        assert_eq!(insert_at_char(&mut text, 1, "    "), 5);
        assert_eq!(text, "a    b");
    }

    #[test]
    fn test_insert_at_char_multibyte() {
        let mut text = "ñá".to_string();
        assert_eq!(insert_at_char(&mut text, 1, "--"), 3);
        assert_eq!(text, "ñ--á");
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut text = "x".to_string();
        assert_eq!(insert_at_char(&mut text, 10, "y"), 2);
        assert_eq!(text, "xy");
    }

    #[test]
    fn test_layout_cache_reuses_job() {
        let mut cache = LayoutCache::default();
        let font = FontId::monospace(14.0);
        let first = cache.job_for("# Title\n", Theme::Light, &font);
        assert_eq!(first.text, "# Title\n");
        let key = cache.key;

        cache.job_for("# Title\n", Theme::Light, &font);
        assert_eq!(cache.key, key);

        cache.job_for("# Title\n", Theme::Dark, &font);
        assert_ne!(cache.key, key);

        cache.clear();
        assert!(cache.key.is_none());
    }

    #[test]
    fn test_show_keeps_text_and_records_metrics() {
        let mut editor = EditorPane::new();
        let mut slot = PaneSlot::new();
        let mut text = "# Title\n\nbody\n".to_string();
        let ctx = egui::Context::default();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let output = editor.show(ui, &mut text, 0, Theme::Light, &mut slot);
                assert!(!output.changed);
                assert!(!output.scrolled);
            });
        });

        assert_eq!(text, "# Title\n\nbody\n");
        assert!(slot.metrics().is_some());
    }
}
