use crate::error::{Result, RomRenamerError};
use rom_renamer_common::matcher::{DEFAULT_COVERAGE_THRESHOLD, DEFAULT_FALLBACK_LIMIT};
use rom_renamer_common::normalizer::DEFAULT_STOP_WORDS;
use rom_renamer_common::similarity::DEFAULT_TOKEN_THRESHOLD;
use rom_renamer_common::{MatchOptions, Normalizer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://thumbnails.libretro.com";
pub const DEFAULT_DELETABLE_PREFIX: &str = "_deletable_";
pub const DEFAULT_LOG_FILE_NAME: &str = "roms_log.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_base_url: String,
    pub token_threshold: f64,
    pub coverage_threshold: f64,
    pub fallback_limit: usize,
    pub deletable_prefix: String,
    pub log_file_name: String,
    pub stop_words: Vec<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.into(),
            token_threshold: DEFAULT_TOKEN_THRESHOLD,
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            fallback_limit: DEFAULT_FALLBACK_LIMIT,
            deletable_prefix: DEFAULT_DELETABLE_PREFIX.into(),
            log_file_name: DEFAULT_LOG_FILE_NAME.into(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RomRenamerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("rom-renamer").join("config.json"))
    }

    /// 値の整合性チェック
    pub fn validate(&self) -> Result<()> {
        self.match_options().validate()?;
        if self.deletable_prefix.is_empty() {
            return Err(RomRenamerError::Config("deletable_prefix が空です".into()));
        }
        let has_separator = self.log_file_name.contains(|c: char| c == '/' || c == '\\');
        if self.log_file_name.is_empty() || has_separator {
            return Err(RomRenamerError::Config(format!(
                "log_file_name が不正です: {:?}",
                self.log_file_name
            )));
        }
        Ok(())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            token_threshold: self.token_threshold,
            coverage_threshold: self.coverage_threshold,
            fallback_limit: self.fallback_limit,
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.stop_words)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(RomRenamerError::Config(format!("URLが不正です: {}", url)));
        }
        self.catalog_base_url = trimmed.to_string();
        self.save()
    }
}
