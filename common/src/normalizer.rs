//! 名前の正規化
//!
//! ファイル名・カタログ名を比較用のトークン列に変換する。
//!
//! ## 処理順
//! 1. `_` を空白へ
//! 2. `[...]` と `(...)` を中身ごと除去（地域・バージョン表記）
//! 3. 残りのASCII記号を空白へ
//! 4. 空白で分割して小文字化
//! 5. 空トークンとストップワードを除外

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// 比較用トークン列（順序は保持するが比較では無視する）
pub type TokenSet = Vec<String>;

/// 既定のストップワード
pub const DEFAULT_STOP_WORDS: &[&str] = &["the", "and", "of", "a", "an", "in", "on"];

lazy_static! {
    static ref BRACKETED: Regex = Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap();
    static ref DEFAULT_NORMALIZER: Normalizer = Normalizer::default();
}

/// ストップワード集合を持つ正規化器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    stop_words: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl Normalizer {
    /// ストップワードを指定して作成（大文字小文字は無視）
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = stop_words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// 名前をトークン列に変換
    ///
    /// # Examples
    /// ```
    /// use rom_renamer_common::Normalizer;
    ///
    /// let normalizer = Normalizer::default();
    /// assert_eq!(
    ///     normalizer.normalize("The_Legend of Zelda (USA) [!]"),
    ///     vec!["legend", "zelda"]
    /// );
    /// ```
    pub fn normalize(&self, name: &str) -> TokenSet {
        let spaced = name.replace('_', " ");
        let without_groups = BRACKETED.replace_all(&spaced, "");
        let cleaned: String = without_groups
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect();

        cleaned
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .filter(|w| !w.is_empty() && !self.is_stop_word(w))
            .collect()
    }
}

/// 既定のストップワードで正規化
pub fn normalize(name: &str) -> TokenSet {
    DEFAULT_NORMALIZER.normalize(name)
}

/// トークンの多重集合として等しいか（順序は無視、個数は考慮）
pub fn token_equivalent(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut b_sorted: Vec<&str> = b.iter().map(String::as_str).collect();
    a_sorted.sort_unstable();
    b_sorted.sort_unstable();
    a_sorted == b_sorted
}
