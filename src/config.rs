use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Storage
    pub data_dir: String,
    pub store_file: String,

    // AI critique
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout_secs: u64,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .unwrap_or_default();

        Config {
            data_dir: env("JOURNAL_DATA_DIR", "data"),
            store_file: env("JOURNAL_STORE_FILE", "protrade_journal_data.json"),
            gemini_api_key,
            gemini_model: env("GEMINI_MODEL", "gemini-2.5-flash"),
            gemini_base_url: env(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/v1beta",
            ),
            ai_timeout_secs: env("AI_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.store_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("settings.json")
    }

    /// A key saved through settings wins over the environment.
    pub fn api_key(&self, settings: &Settings) -> String {
        match settings.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => self.gemini_api_key.clone(),
        }
    }
}

/// User-editable settings persisted next to the journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Settings {
    /// Defaults when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn set_api_key(&mut self, key: &str) {
        let key = key.trim();
        self.api_key = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };
    }
}

/// First and last four characters with the middle (at most 20 chars)
/// replaced by dots. Keys under 8 characters are shown as-is.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 8 {
        return key.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    let hidden = "•".repeat((chars.len() - 8).min(20));
    format!("{}{}{}", head, hidden, tail)
}
