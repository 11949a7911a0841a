//! Rendered preview pane
//!
//! Draws the parsed document into a vertical `ScrollArea`. The document is
//! re-parsed only when the content revision changes.

use super::parser::{parse_markdown, ListType, MarkdownDocument, MarkdownNode, MarkdownNodeType};
use super::syntax::get_highlighter;
use crate::config::Theme;
use crate::preview::PaneSlot;
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, FontId, Frame, Grid, RichText, ScrollArea, Sense, Ui, Vec2};
use log::{debug, warn};

/// Base font size of body text in points
const BODY_FONT_SIZE: f32 = 15.0;
/// Horizontal indent per nesting level
const INDENT: f32 = 18.0;

/// Heading sizes relative to body text, h1 through h6.
const HEADING_SCALE: [f32; 6] = [2.0, 1.5, 1.25, 1.1, 1.0, 0.9];

pub fn heading_size(level: u8, base: f32) -> f32 {
    let index = usize::from(level.clamp(1, 6)) - 1;
    base * HEADING_SCALE[index]
}

/// Marker drawn before the `index`-th item (0-based) of a list.
pub fn list_marker(list_type: ListType, index: usize) -> String {
    match list_type {
        ListType::Bullet => "•".to_string(),
        ListType::Ordered { start, delimiter } => format!("{}{}", start + index, delimiter),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Style
// ─────────────────────────────────────────────────────────────────────────────

/// Emphasis accumulated while descending through inline nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct InlineStyle {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    size: f32,
    color: Option<Color32>,
}

impl InlineStyle {
    fn body(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    fn apply(&self, text: &str, fallback: Color32) -> RichText {
        let mut rich = RichText::new(text)
            .size(self.size)
            .color(self.color.unwrap_or(fallback));
        if self.bold {
            rich = rich.strong();
        }
        if self.italic {
            rich = rich.italics();
        }
        if self.strikethrough {
            rich = rich.strikethrough();
        }
        rich
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Pane
// ─────────────────────────────────────────────────────────────────────────────

/// What happened in the preview this frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PreviewOutput {
    /// The user scrolled the preview.
    pub scrolled: bool,
    /// A link the user clicked.
    pub opened_link: Option<String>,
}

/// Read-only rendered view of the document.
#[derive(Debug)]
pub struct PreviewPane {
    document: MarkdownDocument,
    revision: Option<u64>,
    font_size: f32,
}

impl Default for PreviewPane {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPane {
    pub fn new() -> Self {
        Self {
            document: parse_markdown(""),
            revision: None,
            font_size: BODY_FONT_SIZE,
        }
    }

    /// Re-parse `text` if `revision` differs from the one last rendered.
    /// Returns `true` if the document was re-parsed.
    pub fn update(&mut self, text: &str, revision: u64) -> bool {
        if self.revision == Some(revision) {
            return false;
        }
        self.document = parse_markdown(text);
        self.revision = Some(revision);
        debug!(
            "Preview re-parsed: revision {}, {} blocks",
            revision,
            self.document.blocks().len()
        );
        true
    }

    pub fn document(&self) -> &MarkdownDocument {
        &self.document
    }

    /// Draw the preview, applying any offset queued in `slot` and recording
    /// this frame's measurements back into it.
    pub fn show(&self, ui: &mut Ui, theme: Theme, slot: &mut PaneSlot) -> PreviewOutput {
        let colors = ThemeColors::for_theme(theme);
        let mut ctx = RenderContext {
            colors: &colors,
            theme,
            font_size: self.font_size,
            opened_link: None,
        };

        let mut scroll_area = ScrollArea::vertical()
            .id_source("preview_scroll")
            .auto_shrink([false, false]);
        if let Some(offset) = slot.take_pending_scroll() {
            scroll_area = scroll_area.vertical_scroll_offset(offset);
        }

        let output = scroll_area.show(ui, |ui| {
            Frame::none()
                .inner_margin(egui::Margin::symmetric(16.0, 12.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.spacing_mut().item_spacing = Vec2::new(0.0, 6.0);
                    for block in self.document.blocks() {
                        render_block(ui, block, &mut ctx, 0);
                    }
                });
        });

        let scrolled = slot.record_output(&output);
        PreviewOutput {
            scrolled,
            opened_link: ctx.opened_link,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

struct RenderContext<'a> {
    colors: &'a ThemeColors,
    theme: Theme,
    font_size: f32,
    opened_link: Option<String>,
}

fn render_block(ui: &mut Ui, node: &MarkdownNode, ctx: &mut RenderContext<'_>, depth: usize) {
    match &node.node_type {
        MarkdownNodeType::Heading { level } => {
            ui.add_space(6.0);
            let style = InlineStyle {
                bold: true,
                size: heading_size(*level, ctx.font_size),
                color: Some(ctx.colors.editor.heading),
                ..InlineStyle::default()
            };
            render_inline_children(ui, node, ctx, style);
            if *level <= 2 {
                render_rule(ui, ctx.colors.base.border_subtle);
            }
        }
        MarkdownNodeType::Paragraph => {
            render_inline_children(ui, node, ctx, InlineStyle::body(ctx.font_size));
        }
        MarkdownNodeType::CodeBlock { language, literal } => {
            render_code_block(ui, ctx, language, literal);
        }
        MarkdownNodeType::BlockQuote => render_blockquote(ui, node, ctx, depth),
        MarkdownNodeType::List { list_type, .. } => render_list(ui, node, ctx, depth, *list_type),
        MarkdownNodeType::ThematicBreak => render_rule(ui, ctx.colors.editor.horizontal_rule),
        MarkdownNodeType::Table { .. } => render_table(ui, node, ctx),
        MarkdownNodeType::HtmlBlock(html) => {
            ui.label(
                RichText::new(html.trim_end())
                    .font(FontId::monospace(ctx.font_size * 0.9))
                    .color(ctx.colors.text.muted),
            );
        }
        _ => {
            let text = node.text_content();
            if !text.is_empty() {
                ui.label(RichText::new(text).size(ctx.font_size));
            }
        }
    }
}

fn render_children(ui: &mut Ui, node: &MarkdownNode, ctx: &mut RenderContext<'_>, depth: usize) {
    for child in &node.children {
        render_block(ui, child, ctx, depth);
    }
}

fn render_rule(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), Sense::hover());
    ui.painter().rect_filled(rect, 0.0, color);
}

fn render_code_block(ui: &mut Ui, ctx: &RenderContext<'_>, language: &str, literal: &str) {
    let highlighter = get_highlighter();
    let code = literal.strip_suffix('\n').unwrap_or(literal);
    let job = highlighter.highlight_to_layout_job(
        code,
        language,
        ctx.theme,
        FontId::monospace(ctx.font_size * 0.9),
    );
    let fill = highlighter
        .background(ctx.theme)
        .unwrap_or(ctx.colors.editor.code_block_bg);

    Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, ctx.colors.editor.code_block_border))
        .rounding(4.0)
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if !language.is_empty() {
                ui.label(
                    RichText::new(language)
                        .size(ctx.font_size * 0.75)
                        .color(ctx.colors.text.muted),
                );
            }
            ui.label(job);
        });
}

fn render_blockquote(ui: &mut Ui, node: &MarkdownNode, ctx: &mut RenderContext<'_>, depth: usize) {
    let border = ctx.colors.editor.blockquote_border;
    let response = ui.horizontal(|ui| {
        ui.add_space(12.0);
        ui.vertical(|ui| {
            ui.visuals_mut().override_text_color = Some(ctx.colors.editor.blockquote_text);
            render_children(ui, node, ctx, depth + 1);
        });
    });

    let rect = response.response.rect;
    ui.painter().rect_filled(
        egui::Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height())),
        0.0,
        border,
    );
}

fn render_list(
    ui: &mut Ui,
    node: &MarkdownNode,
    ctx: &mut RenderContext<'_>,
    depth: usize,
    list_type: ListType,
) {
    for (index, item) in node.children.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.add_space(INDENT * depth as f32 + 4.0);
            match item.node_type {
                MarkdownNodeType::TaskItem { checked } => {
                    let mark = if checked { "☑" } else { "☐" };
                    ui.label(
                        RichText::new(mark)
                            .size(ctx.font_size)
                            .color(ctx.colors.editor.checkbox),
                    );
                }
                _ => {
                    ui.label(
                        RichText::new(list_marker(list_type, index))
                            .size(ctx.font_size)
                            .color(ctx.colors.editor.list_marker),
                    );
                }
            }
            ui.add_space(6.0);
            ui.vertical(|ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                for child in &item.children {
                    match child.node_type {
                        // Nested lists carry their own indent
                        MarkdownNodeType::List { list_type, .. } => {
                            render_list(ui, child, ctx, 0, list_type)
                        }
                        _ => render_block(ui, child, ctx, depth + 1),
                    }
                }
            });
        });
    }
}

fn render_table(ui: &mut Ui, node: &MarkdownNode, ctx: &mut RenderContext<'_>) {
    let grid_id = ui.next_auto_id();
    Frame::none()
        .stroke(egui::Stroke::new(1.0, ctx.colors.editor.table_border))
        .inner_margin(egui::Margin::same(6.0))
        .show(ui, |ui| {
            Grid::new(grid_id)
                .striped(true)
                .spacing(Vec2::new(16.0, 4.0))
                .show(ui, |ui| {
                    for row in &node.children {
                        let header = matches!(row.node_type, MarkdownNodeType::TableRow { header: true });
                        for cell in &row.children {
                            let style = InlineStyle {
                                bold: header,
                                ..InlineStyle::body(ctx.font_size)
                            };
                            render_inline_children(ui, cell, ctx, style);
                        }
                        ui.end_row();
                    }
                });
        });
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_inline_children(
    ui: &mut Ui,
    node: &MarkdownNode,
    ctx: &mut RenderContext<'_>,
    style: InlineStyle,
) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for child in &node.children {
            render_inline(ui, child, ctx, style);
        }
    });
}

fn render_inline(ui: &mut Ui, node: &MarkdownNode, ctx: &mut RenderContext<'_>, style: InlineStyle) {
    let text_color = ui
        .visuals()
        .override_text_color
        .unwrap_or(ctx.colors.text.primary);

    match &node.node_type {
        MarkdownNodeType::Text(text) => {
            ui.label(style.apply(text, text_color));
        }
        MarkdownNodeType::Strong => {
            let style = InlineStyle { bold: true, ..style };
            node.children.iter().for_each(|c| render_inline(ui, c, ctx, style));
        }
        MarkdownNodeType::Emphasis => {
            let style = InlineStyle { italic: true, ..style };
            node.children.iter().for_each(|c| render_inline(ui, c, ctx, style));
        }
        MarkdownNodeType::Strikethrough => {
            let style = InlineStyle {
                strikethrough: true,
                ..style
            };
            node.children.iter().for_each(|c| render_inline(ui, c, ctx, style));
        }
        MarkdownNodeType::Code(code) => {
            ui.label(
                RichText::new(code)
                    .font(FontId::monospace(style.size * 0.9))
                    .color(ctx.colors.text.code)
                    .background_color(ctx.colors.editor.code_block_bg),
            );
        }
        MarkdownNodeType::Link { url, title } => {
            let text = node.text_content();
            let label = if text.is_empty() { url.clone() } else { text };
            let link_style = InlineStyle {
                color: Some(ctx.colors.text.link),
                ..style
            };
            let mut response = ui.link(link_style.apply(&label, ctx.colors.text.link));
            if !title.is_empty() {
                response = response.on_hover_text(title);
            }
            if response.on_hover_text(url).clicked() {
                open_link(ctx, url);
            }
        }
        MarkdownNodeType::Image { url, title } => {
            let alt = node.text_content();
            let label = format!("🖼 {}", if alt.is_empty() { url.as_str() } else { alt.as_str() });
            let hover = if title.is_empty() { url } else { title };
            if ui
                .link(RichText::new(label).size(style.size).color(ctx.colors.text.link))
                .on_hover_text(hover)
                .clicked()
            {
                open_link(ctx, url);
            }
        }
        MarkdownNodeType::HtmlInline(html) => {
            ui.label(
                RichText::new(html)
                    .font(FontId::monospace(style.size * 0.9))
                    .color(ctx.colors.text.muted),
            );
        }
        MarkdownNodeType::SoftBreak | MarkdownNodeType::LineBreak => {
            ui.end_row();
        }
        _ => {
            if node.children.is_empty() {
                let text = node.text_content();
                if !text.is_empty() {
                    ui.label(style.apply(&text, text_color));
                }
            } else {
                node.children.iter().for_each(|c| render_inline(ui, c, ctx, style));
            }
        }
    }
}

fn open_link(ctx: &mut RenderContext<'_>, url: &str) {
    debug!("Opening link: {}", url);
    if let Err(e) = open::that(url) {
        warn!("Failed to open link {}: {}", url, e);
    }
    ctx.opened_link = Some(url.to_string());
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::ScrollPane;

    #[test]
    fn test_update_reparses_only_on_new_revision() {
        let mut pane = PreviewPane::new();
        assert!(pane.update("# One", 1));
        assert!(!pane.update("# Changed but same revision", 1));
        assert_eq!(pane.document().blocks().len(), 1);

        assert!(pane.update("# One\n\nTwo", 2));
        assert_eq!(pane.document().blocks().len(), 2);
    }

    #[test]
    fn test_heading_sizes_shrink() {
        assert_eq!(heading_size(1, 10.0), 20.0);
        assert!(heading_size(2, 10.0) > heading_size(3, 10.0));
        assert_eq!(heading_size(9, 10.0), heading_size(6, 10.0));
        assert_eq!(heading_size(0, 10.0), heading_size(1, 10.0));
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(list_marker(ListType::Bullet, 3), "•");
        let ordered = ListType::Ordered {
            start: 3,
            delimiter: '.',
        };
        assert_eq!(list_marker(ordered, 0), "3.");
        assert_eq!(list_marker(ordered, 2), "5.");
    }

    #[test]
    fn test_show_records_metrics() {
        let mut pane = PreviewPane::new();
        pane.update(
            "# Title\n\n- [x] done\n- todo\n\n> quote\n\n```rust\nfn main() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
            1,
        );
        let mut slot = PaneSlot::new();
        let ctx = egui::Context::default();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let output = pane.show(ui, Theme::Dark, &mut slot);
                assert!(!output.scrolled);
                assert!(output.opened_link.is_none());
            });
        });

        let metrics = slot.metrics().expect("preview measured");
        assert_eq!(metrics.scroll_top, 0.0);
        assert!(metrics.scroll_height > 0.0);
    }
}
