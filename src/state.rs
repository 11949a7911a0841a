//! Application state for Markdown Express
//!
//! [`AppState`] owns the document and the user's preferences. It is loaded
//! once from a [`KeyValueStore`] at startup and writes every change back
//! through the same store as it happens.

use crate::config::{
    flag_from_stored, flag_to_stored, set_silent, KeyValueStore, Theme, WindowSize, CONTENT_KEY,
    LANGUAGE_KEY, SYNC_SCROLL_KEY, THEME_KEY, USED_ONCE_KEY, WINDOW_SIZE_KEY,
};
use crate::i18n::{default_document, Language, Translator};
use log::{debug, info};

/// Length a document must exceed before the editor counts as used.
const USED_ONCE_THRESHOLD: usize = 5;

/// How long a toast stays visible, in seconds.
pub const TOAST_DURATION: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// Toasts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A transient status bar message.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Expiry, in seconds of egui input time
    pub expires_at: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// The document, the preferences, and the store they persist to.
pub struct AppState {
    store: Box<dyn KeyValueStore>,
    text: String,
    /// Bumped whenever the text is replaced from outside the editor
    version: u64,
    /// Bumped on every change to the text
    revision: u64,
    translator: Translator,
    theme: Theme,
    /// Session only; the preview always starts visible
    show_preview: bool,
    sync_scroll: bool,
    toast: Option<Toast>,
}

impl AppState {
    /// Load state from `store`.
    ///
    /// Saved content wins when it is non-empty; otherwise the welcome
    /// document of the stored language is shown.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();
        let theme = store
            .get(THEME_KEY)
            .map(|value| Theme::from_stored(&value))
            .unwrap_or_default();
        let sync_scroll = flag_from_stored(store.get(SYNC_SCROLL_KEY).as_deref(), true);

        let text = match store.get(CONTENT_KEY) {
            Some(saved) if !saved.is_empty() => saved,
            _ => default_document(language).to_string(),
        };

        info!(
            "State loaded: language {}, theme {}, {} chars",
            language.code(),
            theme.as_str(),
            text.len()
        );

        Self {
            store,
            text,
            version: 0,
            revision: 0,
            translator: Translator::new(language),
            theme,
            show_preview: true,
            sync_scroll,
            toast: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document
    // ─────────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable text for the editor widget. Call [`text_edited`](Self::text_edited)
    /// when the widget reports a change.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Changes on every edit; keys caches derived from the text.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Persist the text after an edit in the editor.
    pub fn text_edited(&mut self) {
        self.save_text();
    }

    /// Replace the whole document (import, default document).
    pub fn replace_text(&mut self, text: String) {
        self.text = text;
        self.version += 1;
        self.save_text();
    }

    /// Empty the editor and save the empty text.
    pub fn clear(&mut self) {
        self.replace_text(String::new());
        info!("Editor cleared");
    }

    fn save_text(&mut self) {
        self.revision += 1;
        set_silent(self.store.as_mut(), CONTENT_KEY, &self.text);

        if self.text.chars().count() > USED_ONCE_THRESHOLD && self.store.get(USED_ONCE_KEY).is_none() {
            debug!("Editor used for the first time");
            set_silent(self.store.as_mut(), USED_ONCE_KEY, "1");
        }
    }

    fn has_saved_text(&self) -> bool {
        self.store
            .get(CONTENT_KEY)
            .is_some_and(|saved| !saved.is_empty())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────

    pub fn language(&self) -> Language {
        self.translator.language()
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Translate a UI string in the current language.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translator.t(key)
    }

    /// Switch the UI language. While nothing is saved, the document is
    /// replaced by the new language's welcome text, without saving it.
    /// Returns `true` if the language changed.
    pub fn set_language(&mut self, language: Language) -> bool {
        if language == self.language() {
            return false;
        }

        info!("Language changed to {}", language.code());
        self.translator = Translator::new(language);
        set_silent(self.store.as_mut(), LANGUAGE_KEY, language.code());

        if !self.has_saved_text() {
            self.text = default_document(language).to_string();
            self.version += 1;
            self.revision += 1;
        }
        true
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        set_silent(self.store.as_mut(), THEME_KEY, theme.as_str());
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    /// Show or hide the preview. Returns the new visibility.
    pub fn toggle_preview(&mut self) -> bool {
        self.show_preview = !self.show_preview;
        debug!("Preview visible: {}", self.show_preview);
        self.show_preview
    }

    pub fn sync_scroll(&self) -> bool {
        self.sync_scroll
    }

    pub fn set_sync_scroll(&mut self, enabled: bool) {
        self.sync_scroll = enabled;
        set_silent(self.store.as_mut(), SYNC_SCROLL_KEY, flag_to_stored(enabled));
    }

    pub fn window_size(&self) -> WindowSize {
        self.store
            .get(WINDOW_SIZE_KEY)
            .and_then(|value| WindowSize::from_stored(&value))
            .unwrap_or_default()
    }

    pub fn save_window_size(&mut self, size: WindowSize) {
        set_silent(self.store.as_mut(), WINDOW_SIZE_KEY, &size.to_stored());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind, now: f64) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Drop the toast once it has expired.
    pub fn update_toast(&mut self, now: f64) {
        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.toast = None;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
