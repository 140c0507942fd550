//! 操作者入力の取得
//!
//! 1回の呼び出しで1キーを返す。端末実装は raw モードで1文字読み、
//! 読み取りごとに端末設定を元に戻す。

use crate::error::{Result, RomRenamerError};
use dialoguer::console::{Key, Term};
use std::collections::VecDeque;
use std::io;

pub trait DecisionSource {
    /// プロンプトを表示して1キーを読む
    fn read_key(&mut self, prompt: &str) -> Result<char>;
}

/// 端末から1キーずつ読む
pub struct TerminalDecisions {
    term: Term,
}

impl TerminalDecisions {
    /// 標準出力が端末でなければエラー（パイプ・リダイレクト時は1キー入力できない）
    pub fn new() -> Result<Self> {
        let term = Term::stdout();
        if !term.is_term() {
            return Err(RomRenamerError::Prompt(
                "端末ではないため対話入力できません".into(),
            ));
        }
        Ok(Self { term })
    }
}

/// 読み取ったキーを判定用の文字に変換
///
/// 文字以外のキーは無効キー（`'\0'`）として再入力させる。
/// `Key::Unknown` は入力を読めなかったことを示すのでエラーにする。
pub fn key_to_char(key: Key) -> Result<char> {
    match key {
        Key::Char(c) => Ok(c),
        Key::Unknown => Err(RomRenamerError::Prompt("キー入力を読み取れません".into())),
        _ => Ok('\0'),
    }
}

impl DecisionSource for TerminalDecisions {
    fn read_key(&mut self, prompt: &str) -> Result<char> {
        self.term.write_str(prompt)?;
        self.term.flush()?;

        let key = match self.term.read_key() {
            Ok(key) => key,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                self.term.write_line("")?;
                return Err(RomRenamerError::Interrupted);
            }
            Err(e) => return Err(e.into()),
        };

        let ch = key_to_char(key)?;
        self.term.write_line(&if ch.is_control() { String::new() } else { ch.to_string() })?;
        Ok(ch)
    }
}

impl Drop for TerminalDecisions {
    fn drop(&mut self) {
        // 異常終了時も端末を表示可能な状態に戻す
        let _ = self.term.show_cursor();
        let _ = self.term.flush();
    }
}

/// 事前に決めたキー列を順に返す（テスト・自動実行用）
#[derive(Debug, Default, Clone)]
pub struct ScriptedDecisions {
    keys: VecDeque<char>,
    prompts: Vec<String>,
}

impl ScriptedDecisions {
    pub fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
            prompts: Vec::new(),
        }
    }

    /// 表示されたプロンプト（表示順）
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn read_key(&mut self, prompt: &str) -> Result<char> {
        self.prompts.push(prompt.to_string());
        self.keys
            .pop_front()
            .ok_or_else(|| RomRenamerError::Prompt("入力キーがありません".into()))
    }
}
