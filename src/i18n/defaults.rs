//! Welcome documents shown when nothing has been saved yet

use super::Language;

const WELCOME_ES: &str = include_str!("../../assets/defaults/es.md");
const WELCOME_EN: &str = include_str!("../../assets/defaults/en.md");
const WELCOME_PT: &str = include_str!("../../assets/defaults/pt.md");

/// Markdown tutorial in the given language.
pub fn default_document(language: Language) -> &'static str {
    match language {
        Language::Es => WELCOME_ES,
        Language::En => WELCOME_EN,
        Language::Pt => WELCOME_PT,
    }
}
