//! Main application module for Markdown Express
//!
//! Implements the eframe App trait: the header toolbar, the editor and
//! preview panes with their scroll mirror, the status bar, and file
//! import and export.

use crate::config::WindowSize;
use crate::editor::{EditorPane, RemeasureTimer, TextStats};
use crate::error::{Error, Result};
use crate::export::{copy_html_to_clipboard, export_html_file};
use crate::files::dialogs::{open_markdown_dialog, save_html_dialog, save_markdown_dialog};
use crate::files::{read_document, read_dropped_document, write_document};
use crate::i18n::Language;
use crate::markdown::PreviewPane;
use crate::preview::{PaneSlot, ScrollMirror, SyncOutcome};
use crate::state::{AppState, ToastKind};
use crate::theme::ThemeManager;
use eframe::egui::{self, Key, KeyboardShortcut, Modifiers, RichText};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Toolbar and shortcut actions, collected while drawing and applied
/// afterwards to avoid borrow conflicts with the UI closures.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Clear,
    ToggleTheme,
    TogglePreview,
    Upload,
    Download,
    ExportHtml,
    CopyHtml,
    SetLanguage(Language),
    SetSyncScroll(bool),
}

const UPLOAD_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const DOWNLOAD_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const PREVIEW_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::E);

/// The main application.
pub struct MarkdownExpressApp {
    state: AppState,
    theme_manager: ThemeManager,
    editor: EditorPane,
    preview: PreviewPane,
    source_slot: PaneSlot,
    preview_slot: PaneSlot,
    mirror: ScrollMirror,
    remeasure: RemeasureTimer,
    /// Stats of the text at `stats_revision`
    stats: TextStats,
    stats_revision: Option<u64>,
    /// Last known inner window size, saved on exit
    window_size: Option<WindowSize>,
}

impl MarkdownExpressApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        info!("Initializing Markdown Express");
        Self::with_state(&cc.egui_ctx, state)
    }

    fn with_state(ctx: &egui::Context, state: AppState) -> Self {
        let mut theme_manager = ThemeManager::new(state.theme());
        theme_manager.apply(ctx);

        let mut mirror = ScrollMirror::new();
        mirror.set_enabled(state.sync_scroll());

        Self {
            state,
            theme_manager,
            editor: EditorPane::new(),
            preview: PreviewPane::new(),
            source_slot: PaneSlot::new(),
            preview_slot: PaneSlot::new(),
            mirror,
            remeasure: RemeasureTimer::new(),
            stats: TextStats::default(),
            stats_revision: None,
            window_size: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_action(&mut self, action: Action, ctx: &egui::Context) {
        debug!("Action: {:?}", action);
        match action {
            Action::Clear => {
                self.state.clear();
                self.toast_info("status.cleared", None, ctx);
            }
            Action::ToggleTheme => {
                let theme = self.theme_manager.toggle();
                self.state.set_theme(theme);
                self.editor.invalidate_layout();
            }
            Action::TogglePreview => {
                let visible = self.state.toggle_preview();
                if !visible {
                    self.preview_slot.clear();
                }
                self.remeasure.schedule(Instant::now());
            }
            Action::Upload => {
                if let Some(path) = open_markdown_dialog(self.state.t("buttons.upload")) {
                    let result = read_document(&path);
                    self.finish_import(path, result, ctx);
                }
            }
            Action::Download => {
                if let Some(path) = save_markdown_dialog(self.state.t("buttons.download")) {
                    match write_document(&path, self.state.text()) {
                        Ok(()) => self.toast_info("status.saved", Some(&path), ctx),
                        Err(e) => self.toast_error("errors.save", &e, ctx),
                    }
                }
            }
            Action::ExportHtml => {
                if let Some(path) = save_html_dialog(self.state.t("buttons.exportHtml")) {
                    match export_html_file(&path, self.state.text(), self.state.theme()) {
                        Ok(()) => self.toast_info("status.exported", Some(&path), ctx),
                        Err(e) => self.toast_error("errors.export", &e, ctx),
                    }
                }
            }
            Action::CopyHtml => match copy_html_to_clipboard(self.state.text(), self.state.theme()) {
                Ok(()) => self.toast_info("status.copied", None, ctx),
                Err(e) => self.toast_error("errors.clipboard", &e, ctx),
            },
            Action::SetLanguage(language) => {
                self.state.set_language(language);
            }
            Action::SetSyncScroll(enabled) => {
                self.state.set_sync_scroll(enabled);
                self.mirror.set_enabled(enabled);
            }
        }
    }

    fn finish_import(&mut self, path: PathBuf, result: Result<String>, ctx: &egui::Context) {
        match result {
            Ok(text) => {
                self.state.replace_text(text);
                self.source_slot.forget_offset();
                self.preview_slot.forget_offset();
                self.toast_info("status.imported", Some(&path), ctx);
            }
            Err(e) => self.toast_error("errors.import", &e, ctx),
        }
    }

    fn toast_info(&mut self, key: &str, path: Option<&std::path::Path>, ctx: &egui::Context) {
        let label = self.state.t(key);
        let message = match path.and_then(|p| p.file_name()) {
            Some(name) => format!("{}: {}", label, name.to_string_lossy()),
            None => label.to_string(),
        };
        let now = ctx.input(|i| i.time);
        self.state.show_toast(message, ToastKind::Info, now);
    }

    fn toast_error(&mut self, key: &str, error: &Error, ctx: &egui::Context) {
        warn!("{}: {}", key, error);
        let message = format!("{}: {}", self.state.t(key), error);
        let now = ctx.input(|i| i.time);
        self.state.show_toast(message, ToastKind::Error, now);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    fn collect_shortcuts(ctx: &egui::Context, actions: &mut Vec<Action>) {
        ctx.input_mut(|i| {
            if i.consume_shortcut(&UPLOAD_SHORTCUT) {
                actions.push(Action::Upload);
            }
            if i.consume_shortcut(&DOWNLOAD_SHORTCUT) {
                actions.push(Action::Download);
            }
            if i.consume_shortcut(&PREVIEW_SHORTCUT) {
                actions.push(Action::TogglePreview);
            }
        });
    }

    /// Import the first dropped file; only one document is open at a time.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Option<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));

        if let Some(path) = dropped {
            info!("File dropped: {}", path.display());
            let result = read_dropped_document(&path);
            self.finish_import(path, result, ctx);
        }
    }

    fn track_window_size(&mut self, ctx: &egui::Context) {
        let (rect, maximized) = ctx.input(|i| {
            (
                i.viewport().inner_rect,
                i.viewport().maximized.unwrap_or(false),
            )
        });
        if let Some(rect) = rect {
            self.window_size = Some(WindowSize {
                width: rect.width(),
                height: rect.height(),
                maximized,
            });
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_header(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let state = &self.state;
        let colors = self.theme_manager.colors();

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(colors.base.background_secondary)
                    .inner_margin(egui::Margin::symmetric(16.0, 10.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(state.t("app.title")).size(22.0).strong());
                        ui.label(RichText::new(state.t("app.subtitle")).color(colors.text.secondary));
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(state.t("app.idealTitle")).strong().size(12.0));
                            ui.label(
                                RichText::new(state.t("app.idealList"))
                                    .size(12.0)
                                    .color(colors.text.muted),
                            );
                        });
                    });
                });

                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    let current = state.language();
                    ui.menu_button(format!("🌐 {}", current.label()), |ui| {
                        for &language in Language::all() {
                            if ui.selectable_label(language == current, language.name()).clicked() {
                                actions.push(Action::SetLanguage(language));
                                ui.close_menu();
                            }
                        }
                    });

                    if ui.button(state.t("buttons.clear")).clicked() {
                        actions.push(Action::Clear);
                    }

                    if ui
                        .button(state.theme().toggle_icon())
                        .on_hover_text(state.t("buttons.toggleTheme"))
                        .clicked()
                    {
                        actions.push(Action::ToggleTheme);
                    }

                    let preview_label = if state.show_preview() {
                        state.t("buttons.hidePreview")
                    } else {
                        state.t("buttons.showPreview")
                    };
                    if ui.button(preview_label).clicked() {
                        actions.push(Action::TogglePreview);
                    }

                    ui.separator();

                    if ui.button(state.t("buttons.upload")).clicked() {
                        actions.push(Action::Upload);
                    }
                    if ui.button(state.t("buttons.download")).clicked() {
                        actions.push(Action::Download);
                    }
                    if ui.button(state.t("buttons.exportHtml")).clicked() {
                        actions.push(Action::ExportHtml);
                    }
                    if ui.button(state.t("buttons.copyHtml")).clicked() {
                        actions.push(Action::CopyHtml);
                    }

                    ui.separator();

                    let mut sync = state.sync_scroll();
                    if ui.checkbox(&mut sync, state.t("buttons.syncScroll")).changed() {
                        actions.push(Action::SetSyncScroll(sync));
                    }
                });
            });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        if self.stats_revision != Some(self.state.revision()) {
            self.stats = TextStats::from_text(self.state.text());
            self.stats_revision = Some(self.state.revision());
        }

        let colors = self.theme_manager.colors();
        let state = &self.state;
        let stats = self.stats;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(stats.format(state.translator()))
                        .size(12.0)
                        .color(colors.text.muted),
                );

                if let Some(toast) = state.toast() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let color = match toast.kind {
                            ToastKind::Info => colors.ui.success,
                            ToastKind::Error => colors.ui.error,
                        };
                        ui.label(RichText::new(&toast.message).size(12.0).color(color));
                    });
                }
            });
        });
    }

    /// Draw both panes, then feed their scroll events to the mirror.
    fn render_panes(&mut self, ctx: &egui::Context, now: Instant) {
        let theme = self.state.theme();
        let mut preview_scrolled = false;

        if self.state.show_preview() {
            self.preview.update(self.state.text(), self.state.revision());
            let preview = &self.preview;
            let slot = &mut self.preview_slot;
            let colors = self.theme_manager.colors();

            egui::SidePanel::right("preview")
                .resizable(false)
                .exact_width(ctx.screen_rect().width() / 2.0)
                .frame(egui::Frame::none().fill(colors.base.background))
                .show(ctx, |ui| {
                    preview_scrolled = preview.show(ui, theme, slot).scrolled;
                });
        }

        let version = self.state.version();
        let editor = &mut self.editor;
        let state = &mut self.state;
        let slot = &mut self.source_slot;
        let editor_output = egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::same(4.0)))
            .show(ctx, |ui| editor.show(ui, state.text_mut(), version, theme, slot))
            .inner;

        if editor_output.changed {
            self.state.text_edited();
        }

        let preview_slot = self.state.show_preview().then_some(&mut self.preview_slot);
        let outcome = if editor_output.scrolled {
            Some(self.mirror.on_source_scroll(&self.source_slot, preview_slot, now))
        } else if preview_scrolled {
            preview_slot.map(|preview_slot| {
                self.mirror
                    .on_target_scroll(&*preview_slot, Some(&mut self.source_slot), now)
            })
        } else {
            None
        };

        if let Some(SyncOutcome::Mirrored { .. }) = outcome {
            ctx.request_repaint();
        }
    }

    /// Fire due timers and make sure a frame arrives for the next one.
    fn poll_timers(&mut self, ctx: &egui::Context, now: Instant) {
        self.mirror.poll(now);

        if self.remeasure.poll(now) {
            debug!("Re-measuring source pane");
            self.editor.invalidate_layout();
            self.source_slot.forget_offset();
            self.preview_slot.forget_offset();
            ctx.request_repaint();
        }

        let next = [
            self.mirror.time_until_release(now),
            self.remeasure.time_until_due(now),
        ]
        .into_iter()
        .flatten()
        .min();
        if let Some(delay) = next {
            ctx.request_repaint_after(delay);
        }
    }
}

impl eframe::App for MarkdownExpressApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.theme_manager.apply_if_needed(ctx);
        self.state.update_toast(ctx.input(|i| i.time));
        self.track_window_size(ctx);
        self.handle_dropped_files(ctx);
        self.poll_timers(ctx, now);

        let mut actions = Vec::new();
        Self::collect_shortcuts(ctx, &mut actions);
        self.render_header(ctx, &mut actions);
        self.render_status_bar(ctx);
        self.render_panes(ctx, now);

        for action in actions {
            self.apply_action(action, ctx);
        }

        if let Some(toast) = self.state.toast() {
            let remaining = toast.expires_at - ctx.input(|i| i.time);
            if remaining > 0.0 {
                ctx.request_repaint_after(std::time::Duration::from_secs_f64(remaining));
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        if let Some(size) = self.window_size {
            self.state.save_window_size(size);
        }
    }
}
