//! Client settings: backend location, timeouts and limits.
//!
//! Resolution order:
//! 1. Built-in defaults
//! 2. `{config_dir}/blogy/settings.json` if present
//! 3. `BLOGY_*` environment variables (the binary loads `.env` files first)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::locale::Locale;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Prior chat turns sent with each message.
pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_TRANSLATION_MEMO_CAPACITY: usize = 512;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub chat_history_limit: usize,
    /// 0 disables translation memoization.
    pub translation_memo_capacity: usize,
    pub default_locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            chat_history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
            translation_memo_capacity: DEFAULT_TRANSLATION_MEMO_CAPACITY,
            default_locale: Locale::default(),
        }
    }
}

/// Directory holding the settings file.
fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blogy")
}

/// Full path to the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

impl Settings {
    /// Defaults, then the settings file, then env overrides.
    pub fn load() -> Self {
        let mut settings = Self::load_file(&settings_path()).unwrap_or_default();
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Read a settings file. Missing or invalid files yield `None`.
    pub fn load_file(path: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(settings) => {
                log::info!("[CONFIG] Loaded {}", path.display());
                Some(settings)
            }
            Err(e) => {
                log::warn!("[CONFIG] Ignoring invalid {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Persist to the default settings path.
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write settings: {}", e))?;
        log::info!("[CONFIG] Saved settings to {}", path.display());
        Ok(())
    }

    /// Apply `BLOGY_*` overrides from `lookup`. Unparsable values are logged
    /// and skipped.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("BLOGY_BACKEND_URL") {
            log::info!("[CONFIG] Backend override: {}", url);
            self.backend_url = url.trim().to_string();
        }
        if let Some(raw) = get("BLOGY_REQUEST_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => log::warn!("[CONFIG] Ignoring BLOGY_REQUEST_TIMEOUT_SECS={}", raw),
            }
        }
        if let Some(raw) = get("BLOGY_CHAT_HISTORY_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(limit) => self.chat_history_limit = limit,
                Err(_) => log::warn!("[CONFIG] Ignoring BLOGY_CHAT_HISTORY_LIMIT={}", raw),
            }
        }
        if let Some(raw) = get("BLOGY_TRANSLATION_MEMO") {
            match raw.trim().parse::<usize>() {
                Ok(cap) => self.translation_memo_capacity = cap,
                Err(_) => log::warn!("[CONFIG] Ignoring BLOGY_TRANSLATION_MEMO={}", raw),
            }
        }
        if let Some(raw) = get("BLOGY_LOCALE") {
            match Locale::parse(&raw) {
                Ok(locale) => self.default_locale = locale,
                Err(e) => log::warn!("[CONFIG] Ignoring BLOGY_LOCALE: {}", e),
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_backend_conventions() {
        let s = Settings::default();
        assert_eq!(s.backend_url, "http://localhost:3001");
        assert_eq!(s.chat_history_limit, 10);
        assert_eq!(s.request_timeout(), Duration::from_secs(30));
        assert_eq!(s.default_locale.as_str(), "en");
    }

    #[test]
    fn env_overrides_apply_and_bad_values_are_skipped() {
        let mut s = Settings::default();
        s.apply_env(env(&[
            ("BLOGY_BACKEND_URL", "https://api.blogy.example"),
            ("BLOGY_REQUEST_TIMEOUT_SECS", "abc"),
            ("BLOGY_CHAT_HISTORY_LIMIT", "4"),
            ("BLOGY_TRANSLATION_MEMO", "0"),
            ("BLOGY_LOCALE", "ja"),
        ]));
        assert_eq!(s.backend_url, "https://api.blogy.example");
        assert_eq!(s.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(s.chat_history_limit, 4);
        assert_eq!(s.translation_memo_capacity, 0);
        assert_eq!(s.default_locale.as_str(), "ja");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let path = std::env::temp_dir().join("blogy-test-partial-settings.json");
        std::fs::write(&path, r#"{"backendUrl": "http://10.0.0.2:3001"}"#).unwrap();
        let s = Settings::load_file(&path).unwrap();
        assert_eq!(s.backend_url, "http://10.0.0.2:3001");
        assert_eq!(s.chat_history_limit, DEFAULT_CHAT_HISTORY_LIMIT);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("blogy-test-settings-roundtrip");
        let path = dir.join("settings.json");
        let _ = std::fs::remove_dir_all(&dir);

        let mut s = Settings::default();
        s.default_locale = Locale::parse("ko").unwrap();
        s.save_to(&path).unwrap();
        assert_eq!(Settings::load_file(&path).unwrap(), s);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_file_is_ignored() {
        let path = std::env::temp_dir().join("blogy-test-invalid-settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Settings::load_file(&path).is_none());
        let _ = std::fs::remove_file(&path);
    }
}
