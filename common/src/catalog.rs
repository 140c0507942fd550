//! 正式名カタログ
//!
//! 取得順を保持し、重複もそのまま保持する。構築後は読み取り専用。

use crate::normalizer::{Normalizer, TokenSet};
use std::collections::HashSet;

/// カタログの1エントリ（正式名と正規化済みトークン）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub tokens: TokenSet,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    names: HashSet<String>,
}

impl Catalog {
    /// 正式名の列からカタログを構築（トークンは構築時に一度だけ計算）
    pub fn new<I, S>(names: I, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<CatalogEntry> = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let tokens = normalizer.normalize(&name);
                CatalogEntry { name, tokens }
            })
            .collect();
        let names = entries.iter().map(|e| e.name.clone()).collect();
        Self { entries, names }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 完全一致で含まれるか
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
