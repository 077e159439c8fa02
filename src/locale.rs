//! Locale codes for the UI and for translated content.
//!
//! A `Locale` is always passed explicitly to translation and assistant
//! calls; nothing in this crate reads an ambient "current locale".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::assistant::AssistantError;

/// Locale used when a record carries no language or the UI asks for one we
/// have no dictionary for.
pub const DEFAULT_LOCALE: &str = "en";

/// A language the UI ships a dictionary for.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    /// BCP-47 tag handed to the speech synthesizer.
    pub voice_tag: &'static str,
}

pub const LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo { code: "en", name: "English", native_name: "English", voice_tag: "en-US" },
    LanguageInfo { code: "hi", name: "Hindi", native_name: "हिंदी", voice_tag: "hi-IN" },
    LanguageInfo { code: "ar", name: "Arabic", native_name: "العربية", voice_tag: "ar-SA" },
    LanguageInfo { code: "fr", name: "French", native_name: "Français", voice_tag: "fr-FR" },
    LanguageInfo { code: "de", name: "German", native_name: "Deutsch", voice_tag: "de-DE" },
    LanguageInfo { code: "zh", name: "Chinese", native_name: "中文", voice_tag: "zh-CN" },
    LanguageInfo { code: "ja", name: "Japanese", native_name: "日本語", voice_tag: "ja-JP" },
    LanguageInfo { code: "es", name: "Spanish", native_name: "Español", voice_tag: "es-ES" },
    LanguageInfo { code: "it", name: "Italian", native_name: "Italiano", voice_tag: "it-IT" },
    LanguageInfo { code: "pt", name: "Portuguese", native_name: "Português", voice_tag: "pt-PT" },
    LanguageInfo { code: "ko", name: "Korean", native_name: "한국어", voice_tag: "ko-KR" },
];

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{2,8})?$").expect("locale pattern is valid")
    })
}

/// An ISO-639-1-like language code, e.g. `en`, `fr`, `pt-br`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parse and normalise a locale code. Empty or malformed codes are
    /// rejected before anything touches the network.
    pub fn parse(raw: &str) -> Result<Self, AssistantError> {
        let code = raw.trim().replace('_', "-").to_ascii_lowercase();
        if code.is_empty() {
            return Err(AssistantError::Validation(
                "Locale code must not be empty".to_string(),
            ));
        }
        if !code_pattern().is_match(&code) {
            return Err(AssistantError::Validation(format!(
                "Invalid locale code: {}",
                raw
            )));
        }
        Ok(Self(code))
    }

    pub fn default_locale() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Info for this locale if the UI supports it.
    pub fn info(&self) -> Option<&'static LanguageInfo> {
        LANGUAGES.iter().find(|l| l.code == self.0)
    }

    pub fn is_supported(&self) -> bool {
        self.info().is_some()
    }

    /// The locale itself when supported, otherwise English.
    pub fn ui_or_default(&self) -> Self {
        if self.is_supported() {
            self.clone()
        } else {
            log::debug!("[LOCALE] No dictionary for '{}', using {}", self.0, DEFAULT_LOCALE);
            Self::default_locale()
        }
    }

    /// Voice tag for speech synthesis, or the raw code when unknown.
    pub fn voice_tag(&self) -> &str {
        self.info().map(|l| l.voice_tag).unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = AssistantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl std::str::FromStr for Locale {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalises_case_and_separator() {
        assert_eq!(Locale::parse(" FR ").unwrap().as_str(), "fr");
        assert_eq!(Locale::parse("pt_BR").unwrap().as_str(), "pt-br");
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert!(Locale::parse("").unwrap_err().is_validation());
        assert!(Locale::parse("   ").unwrap_err().is_validation());
        assert!(Locale::parse("english!").is_err());
        assert!(Locale::parse("e").is_err());
    }

    #[test]
    fn unsupported_locale_falls_back_to_english_for_ui() {
        let sw = Locale::parse("sw").unwrap();
        assert!(!sw.is_supported());
        assert_eq!(sw.ui_or_default().as_str(), "en");
        assert_eq!(sw.voice_tag(), "sw");
    }

    #[test]
    fn voice_tags_cover_every_supported_locale() {
        assert_eq!(LANGUAGES.len(), 11);
        for lang in LANGUAGES {
            let locale = Locale::parse(lang.code).unwrap();
            assert!(locale.voice_tag().starts_with(lang.code));
        }
        assert_eq!(Locale::parse("pt").unwrap().voice_tag(), "pt-PT");
    }

    #[test]
    fn serde_round_trips_through_plain_string() {
        let locale: Locale = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(locale.as_str(), "ja");
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"ja\"");
        assert!(serde_json::from_str::<Locale>("\"\"").is_err());
    }
}
