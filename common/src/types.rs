//! 共通型定義
//!
//! ローカルファイル・確定アクション・ログ行

use serde::{Deserialize, Serialize};
use std::fmt;

/// ローカルファイル（拡張子で分割済み）
///
/// `extension` は先頭のドットを含む（拡張子なしは空文字）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalEntry {
    pub base_name: String,
    pub extension: String,
}

impl LocalEntry {
    /// ファイル名を最後のドットで分割
    ///
    /// 先頭のドット（隠しファイル）は区切りとみなさない。
    ///
    /// # Examples
    /// ```
    /// use rom_renamer_common::LocalEntry;
    ///
    /// let entry = LocalEntry::from_file_name("Super_Mario_Bros.nes");
    /// assert_eq!(entry.base_name, "Super_Mario_Bros");
    /// assert_eq!(entry.extension, ".nes");
    /// ```
    pub fn from_file_name(file_name: &str) -> Self {
        let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
        match file_name[leading_dots..].rfind('.') {
            Some(idx) => {
                let split = leading_dots + idx;
                Self {
                    base_name: file_name[..split].to_string(),
                    extension: file_name[split..].to_string(),
                }
            }
            None => Self {
                base_name: file_name.to_string(),
                extension: String::new(),
            },
        }
    }

    /// 元のファイル名
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }

    /// 正式名に元の拡張子を付けたファイル名
    pub fn target_file_name(&self, canonical_name: &str) -> String {
        format!("{}{}", canonical_name, self.extension)
    }
}

/// 1ファイルに対する確定アクション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// 候補名へリネーム
    Accepted(String),
    /// 変更しない
    Skipped,
    /// 削除候補プレフィックス付きで候補名へリネーム
    MarkedDeletable(String),
    /// 候補なし（ファイル操作なし）
    NoMatch,
}

/// 処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Renamed(String),
    MarkedDeletable(String),
    LeftUnchanged,
    SkippedExists(String),
    NoMatch,
    RenameFailed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Renamed(name) => write!(f, "{}", name),
            Outcome::MarkedDeletable(name) => write!(f, "{}", name),
            Outcome::LeftUnchanged => write!(f, "Left unchanged"),
            Outcome::SkippedExists(name) => write!(f, "Skipped — exists: {}", name),
            Outcome::NoMatch => write!(f, "No match"),
            Outcome::RenameFailed(reason) => write!(f, "Rename failed: {}", reason),
        }
    }
}

/// ログ行（`<元のファイル名> → <結果>`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub original_name: String,
    pub outcome: Outcome,
}

impl LogEntry {
    pub fn new(original_name: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            original_name: original_name.into(),
            outcome,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.original_name, self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let entry = LocalEntry::from_file_name("game.rom");
        assert_eq!(entry.base_name, "game");
        assert_eq!(entry.extension, ".rom");
        assert_eq!(entry.file_name(), "game.rom");
    }

    #[test]
    fn test_split_at_last_dot() {
        let entry = LocalEntry::from_file_name("Dr. Mario (USA).nes");
        assert_eq!(entry.base_name, "Dr. Mario (USA)");
        assert_eq!(entry.extension, ".nes");
    }

    #[test]
    fn test_split_no_extension() {
        let entry = LocalEntry::from_file_name("README");
        assert_eq!(entry.base_name, "README");
        assert_eq!(entry.extension, "");
    }

    #[test]
    fn test_split_hidden_file() {
        let entry = LocalEntry::from_file_name(".hidden");
        assert_eq!(entry.base_name, ".hidden");
        assert_eq!(entry.extension, "");

        let entry = LocalEntry::from_file_name(".hidden.zip");
        assert_eq!(entry.base_name, ".hidden");
        assert_eq!(entry.extension, ".zip");
    }

    #[test]
    fn test_target_file_name_keeps_extension() {
        let entry = LocalEntry::from_file_name("Super_Mario_Bros.nes");
        assert_eq!(
            entry.target_file_name("Super Mario Bros (USA)"),
            "Super Mario Bros (USA).nes"
        );
    }

    #[test]
    fn test_log_entry_display() {
        let entry = LogEntry::new("ff7.bin", Outcome::NoMatch);
        assert_eq!(entry.to_string(), "ff7.bin → No match");

        let entry = LogEntry::new("a.nes", Outcome::Renamed("A (USA).nes".into()));
        assert_eq!(entry.to_string(), "a.nes → A (USA).nes");

        let entry = LogEntry::new("b.nes", Outcome::LeftUnchanged);
        assert_eq!(entry.to_string(), "b.nes → Left unchanged");
    }
}
