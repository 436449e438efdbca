//! Supported Output Languages
//!
//! Copy can be produced in any of these languages; the English name is what
//! gets threaded into agent prompts. `rtl` marks right-to-left scripts so
//! the Developer can set `dir="rtl"` on the document.

pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub rtl: bool,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", rtl: false },
    Language { code: "es", name: "Spanish", rtl: false },
    Language { code: "fr", name: "French", rtl: false },
    Language { code: "de", name: "German", rtl: false },
    Language { code: "it", name: "Italian", rtl: false },
    Language { code: "pt", name: "Portuguese", rtl: false },
    Language { code: "nl", name: "Dutch", rtl: false },
    Language { code: "pl", name: "Polish", rtl: false },
    Language { code: "tr", name: "Turkish", rtl: false },
    Language { code: "ja", name: "Japanese", rtl: false },
    Language { code: "ko", name: "Korean", rtl: false },
    Language { code: "zh", name: "Chinese", rtl: false },
    Language { code: "ar", name: "Arabic", rtl: true },
    Language { code: "he", name: "Hebrew", rtl: true },
];

/// Look up a language by ISO code or English name (case-insensitive).
pub fn find_language(code_or_name: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|lang| {
        lang.code.eq_ignore_ascii_case(code_or_name)
            || lang.name.eq_ignore_ascii_case(code_or_name)
    })
}

/// Prompt-facing language name; unknown inputs default to English.
pub fn language_name(code_or_name: &str) -> &'static str {
    find_language(code_or_name).map(|l| l.name).unwrap_or("English")
}
