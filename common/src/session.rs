//! 対話解決セッション
//!
//! 1ファイル分の候補リストを操作者の入力（y/n/r/b/d）で巡回し、
//! 確定アクションを1つ決める状態機械。
//!
//! - `y` 採用（リネーム先が既に存在する場合は状態そのままで衝突を通知）
//! - `n` スキップ（次のファイルへ進む）
//! - `r` 次の候補（末尾から先頭へ循環）
//! - `b` 前の候補（先頭から末尾へ循環）
//! - `d` 削除候補プレフィックス付きで採用（無条件）

use crate::error::{Error, Result};
use crate::matcher::{Candidate, CandidateList};
use crate::types::{Action, LocalEntry};

/// 操作者の入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
    Next,
    Previous,
    MarkDeletable,
}

impl Decision {
    /// プロンプト表示用のキー一覧
    pub const KEYS: &'static str = "y/n/r/b/d";

    pub const ALL: [Decision; 5] = [
        Decision::Accept,
        Decision::Reject,
        Decision::Next,
        Decision::Previous,
        Decision::MarkDeletable,
    ];

    /// キー入力を変換（大文字小文字は無視）
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'y' => Some(Decision::Accept),
            'n' => Some(Decision::Reject),
            'r' => Some(Decision::Next),
            'b' => Some(Decision::Previous),
            'd' => Some(Decision::MarkDeletable),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Decision::Accept => 'y',
            Decision::Reject => 'n',
            Decision::Next => 'r',
            Decision::Previous => 'b',
            Decision::MarkDeletable => 'd',
        }
    }
}

/// 入力1回分の遷移結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// カーソル移動
    Moved { cursor: usize },
    /// リネーム先が既に存在（状態は変わらない）
    Collision { target: String },
    /// 不明なキー（状態は変わらない）
    Invalid(char),
    /// 確定
    Resolved(Action),
}

/// 1ファイル分の解決状態
#[derive(Debug, Clone)]
pub struct ResolutionSession {
    entry: LocalEntry,
    candidates: Vec<Candidate>,
    cursor: usize,
    resolved: Option<Action>,
}

impl ResolutionSession {
    /// 候補が空の場合は作成しない
    pub fn new(entry: LocalEntry, candidates: CandidateList) -> Result<Self> {
        if candidates.is_empty() {
            return Err(Error::NoCandidates(entry.file_name()));
        }
        Ok(Self {
            entry,
            candidates: candidates.candidates,
            cursor: 0,
            resolved: None,
        })
    }

    pub fn entry(&self) -> &LocalEntry {
        &self.entry
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn current(&self) -> &Candidate {
        &self.candidates[self.cursor]
    }

    /// 現在の候補に元の拡張子を付けたファイル名
    pub fn target_name(&self) -> String {
        self.entry.target_file_name(&self.current().canonical_name)
    }

    pub fn resolution(&self) -> Option<&Action> {
        self.resolved.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// キー入力を適用
    pub fn apply_key<F>(&mut self, key: char, target_exists: F) -> Transition
    where
        F: Fn(&str) -> bool,
    {
        match Decision::from_key(key) {
            Some(decision) => self.apply(decision, target_exists),
            None => Transition::Invalid(key),
        }
    }

    /// 入力を適用
    ///
    /// `target_exists` はリネーム先ファイル名が既に存在するかを返す。
    /// 確定後の入力は無視され、同じ確定結果を返す。
    pub fn apply<F>(&mut self, decision: Decision, target_exists: F) -> Transition
    where
        F: Fn(&str) -> bool,
    {
        if let Some(action) = &self.resolved {
            return Transition::Resolved(action.clone());
        }

        let len = self.candidates.len();
        match decision {
            Decision::Accept => {
                let target = self.target_name();
                if target_exists(&target) {
                    return Transition::Collision { target };
                }
                self.resolve(Action::Accepted(self.current().canonical_name.clone()))
            }
            Decision::Reject => self.resolve(Action::Skipped),
            Decision::Next => {
                self.cursor = (self.cursor + 1) % len;
                Transition::Moved { cursor: self.cursor }
            }
            Decision::Previous => {
                self.cursor = (self.cursor + len - 1) % len;
                Transition::Moved { cursor: self.cursor }
            }
            Decision::MarkDeletable => {
                self.resolve(Action::MarkedDeletable(self.current().canonical_name.clone()))
            }
        }
    }

    fn resolve(&mut self, action: Action) -> Transition {
        self.resolved = Some(action.clone());
        Transition::Resolved(action)
    }
}
