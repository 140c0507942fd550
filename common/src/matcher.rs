//! カタログ照合
//!
//! 3段階で候補を探す:
//! 1. 完全一致 → 1件のみ返して終了
//! 2. トークン一致率（カタログ側トークンの70%以上が類似） → 一致数の降順
//! 3. 2が0件のときのみ、1トークン以上一致したもの → 一致数・名前類似度の降順で上位10件

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use crate::normalizer::Normalizer;
use crate::similarity::{name_similarity, token_similar, DEFAULT_TOKEN_THRESHOLD};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// 既定のトークン一致率
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.7;

/// フォールバック検索の最大件数
pub const DEFAULT_FALLBACK_LIMIT: usize = 10;

/// 候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub canonical_name: String,
    pub matched_token_count: usize,
    pub similarity_score: f64,
}

/// 候補を生成した段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    Exact,
    Token,
    Fallback,
    None,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Token => write!(f, "token"),
            MatchTier::Fallback => write!(f, "fallback"),
            MatchTier::None => write!(f, "none"),
        }
    }
}

/// 順位付き候補リスト（先頭が最良）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateList {
    pub tier: MatchTier,
    pub candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn empty() -> Self {
        Self {
            tier: MatchTier::None,
            candidates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.canonical_name.as_str()).collect()
    }
}

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// トークン同士を類似とみなす比率
    pub token_threshold: f64,
    /// 候補として採用するカタログ側トークンの一致率
    pub coverage_threshold: f64,
    /// フォールバック検索で返す最大件数
    pub fallback_limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            token_threshold: DEFAULT_TOKEN_THRESHOLD,
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            fallback_limit: DEFAULT_FALLBACK_LIMIT,
        }
    }
}

impl MatchOptions {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("token_threshold", self.token_threshold),
            ("coverage_threshold", self.coverage_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidThreshold { name, value });
            }
        }
        if self.fallback_limit == 0 {
            return Err(Error::Config("fallback_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// カタログを保持する照合器
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Catalog,
    normalizer: Normalizer,
    options: MatchOptions,
}

impl Matcher {
    pub fn new(catalog: Catalog, normalizer: Normalizer, options: MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            catalog,
            normalizer,
            options,
        })
    }

    /// 正式名の列から照合器を構築
    pub fn from_names<I, S>(names: I, normalizer: Normalizer, options: MatchOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog = Catalog::new(names, &normalizer);
        Self::new(catalog, normalizer, options)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// ローカルのベース名（拡張子なし）に対する候補を返す
    pub fn match_name(&self, local_base_name: &str) -> CandidateList {
        // 1. 完全一致
        if self.catalog.contains(local_base_name) {
            debug!("完全一致: {}", local_base_name);
            return CandidateList {
                tier: MatchTier::Exact,
                candidates: vec![Candidate {
                    canonical_name: local_base_name.to_string(),
                    matched_token_count: self.normalizer.normalize(local_base_name).len(),
                    similarity_score: 1.0,
                }],
            };
        }

        let local_tokens = self.normalizer.normalize(local_base_name);
        if local_tokens.is_empty() {
            debug!("トークンなし: {}", local_base_name);
            return CandidateList::empty();
        }

        // 1トークン以上一致したエントリ（同名は最初の1件のみ）
        let mut seen = HashSet::new();
        let mut overlapping: Vec<(&CatalogEntry, usize)> = Vec::new();
        for entry in self.catalog.entries() {
            if entry.tokens.is_empty() || !seen.insert(entry.name.as_str()) {
                continue;
            }
            let count = self.matched_token_count(&local_tokens, &entry.tokens);
            if count > 0 {
                overlapping.push((entry, count));
            }
        }

        // 2. トークン一致率
        let mut accepted: Vec<Candidate> = overlapping
            .iter()
            .filter(|(entry, count)| {
                *count as f64 / entry.tokens.len() as f64 >= self.options.coverage_threshold
            })
            .map(|(entry, count)| self.candidate(local_base_name, entry, *count))
            .collect();

        if !accepted.is_empty() {
            // 安定ソートなので同数はカタログ順
            accepted.sort_by(|a, b| b.matched_token_count.cmp(&a.matched_token_count));
            debug!("トークン一致: {} → {}件", local_base_name, accepted.len());
            return CandidateList {
                tier: MatchTier::Token,
                candidates: accepted,
            };
        }

        // 3. フォールバック
        let mut fallback: Vec<Candidate> = overlapping
            .iter()
            .map(|(entry, count)| self.candidate(local_base_name, entry, *count))
            .collect();

        if fallback.is_empty() {
            debug!("候補なし: {}", local_base_name);
            return CandidateList::empty();
        }

        fallback.sort_by(|a, b| {
            b.matched_token_count
                .cmp(&a.matched_token_count)
                .then_with(|| {
                    b.similarity_score
                        .partial_cmp(&a.similarity_score)
                        .unwrap_or(Ordering::Equal)
                })
        });
        fallback.truncate(self.options.fallback_limit);
        debug!("フォールバック: {} → {}件", local_base_name, fallback.len());

        CandidateList {
            tier: MatchTier::Fallback,
            candidates: fallback,
        }
    }

    /// ローカル側のいずれかのトークンと類似するカタログ側トークンの数
    fn matched_token_count(&self, local_tokens: &[String], remote_tokens: &[String]) -> usize {
        remote_tokens
            .iter()
            .filter(|remote| {
                local_tokens
                    .iter()
                    .any(|local| token_similar(remote, local, self.options.token_threshold))
            })
            .count()
    }

    fn candidate(&self, local_base_name: &str, entry: &CatalogEntry, count: usize) -> Candidate {
        Candidate {
            canonical_name: entry.name.clone(),
            matched_token_count: count,
            similarity_score: name_similarity(local_base_name, &entry.name),
        }
    }
}
