//! エラー型定義

use thiserror::Error;

/// 照合エンジンの共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid threshold: {name} = {value} (expected 0.0..=1.0)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("No candidates for {0}")]
    NoCandidates(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
