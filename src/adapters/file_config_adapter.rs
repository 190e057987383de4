//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Every `section.key` folioscan reads.
pub const KNOWN_KEYS: [(&str, &str); 6] = [
    ("normalizer", "strictness"),
    ("prices", "symbol_column"),
    ("prices", "price_column"),
    ("report", "title"),
    ("report", "decimals"),
    ("report", "show_diagnostics"),
];

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// An adapter with no sections; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    /// Keys present in the file that folioscan never reads, as
    /// `section.key`, sorted. Usually a typo such as `[report] decimal`.
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .config
            .get_map_ref()
            .iter()
            .flat_map(|(section, keys)| keys.keys().map(move |key| (section, key)))
            .filter(|(section, key)| {
                !KNOWN_KEYS
                    .iter()
                    .any(|(s, k)| s == &section.as_str() && k == &key.as_str())
            })
            .map(|(section, key)| format!("{section}.{key}"))
            .collect();
        unknown.sort();
        unknown
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}
