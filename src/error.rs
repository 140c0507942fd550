use thiserror::Error;

#[derive(Error, Debug)]
pub enum RomRenamerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("カタログ取得エラー: {0}")]
    CatalogFetch(String),

    #[error("カタログが空です: {0}")]
    EmptyCatalog(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("中断されました")]
    Interrupted,

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] rom_renamer_common::Error),
}

pub type Result<T> = std::result::Result<T, RomRenamerError>;
