//! 照合〜リネームの一括処理
//!
//! 1ファイルずつ順に照合し、候補があれば確定するまで入力を待ってから次へ進む。
//! 途中で入力が中断されても、それまでの結果は `RunSummary` に残る。

use crate::decision::DecisionSource;
use crate::error::Result;
use crate::fs_ops::FileOps;
use crate::renamer::Renamer;
use crate::scanner::LocalFile;
use log::debug;
use rom_renamer_common::{
    Action, CandidateList, Decision, LogEntry, MatchTier, Matcher, Outcome, ResolutionSession,
    Transition,
};

/// 実行結果の集計
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub renamed: usize,
    pub marked_deletable: usize,
    pub left_unchanged: usize,
    pub skipped_exists: usize,
    pub no_match: usize,
    pub failed: usize,
    /// 既に正式名だったファイル（ログには残さない）
    pub already_canonical: usize,
    pub log: Vec<LogEntry>,
}

impl RunSummary {
    fn record(&mut self, entry: LogEntry) {
        match entry.outcome {
            Outcome::Renamed(_) => self.renamed += 1,
            Outcome::MarkedDeletable(_) => self.marked_deletable += 1,
            Outcome::LeftUnchanged => self.left_unchanged += 1,
            Outcome::SkippedExists(_) => self.skipped_exists += 1,
            Outcome::NoMatch => self.no_match += 1,
            Outcome::RenameFailed(_) => self.failed += 1,
        }
        self.log.push(entry);
    }

    /// 変更または未一致のファイルがあったか
    pub fn changes_needed(&self) -> bool {
        !self.log.is_empty()
    }

    pub fn processed(&self) -> usize {
        self.log.len() + self.already_canonical
    }
}

pub struct Pipeline<'a, F: FileOps, D: DecisionSource> {
    matcher: &'a Matcher,
    renamer: Renamer<'a, F>,
    decisions: &'a mut D,
    summary: RunSummary,
}

impl<'a, F: FileOps, D: DecisionSource> Pipeline<'a, F, D> {
    pub fn new(matcher: &'a Matcher, renamer: Renamer<'a, F>, decisions: &'a mut D) -> Self {
        Self {
            matcher,
            renamer,
            decisions,
            summary: RunSummary::default(),
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_summary(self) -> RunSummary {
        self.summary
    }

    /// 全ファイルを順に処理（入力エラーで中断）
    pub fn process_all(&mut self, files: &[LocalFile]) -> Result<()> {
        for (idx, file) in files.iter().enumerate() {
            debug!("[{}/{}] {}", idx + 1, files.len(), file.file_name);
            self.process(file)?;
        }
        Ok(())
    }

    /// 1ファイルを処理
    pub fn process(&mut self, file: &LocalFile) -> Result<()> {
        let candidates = self.matcher.match_name(&file.entry.base_name);

        match candidates.tier {
            // 完全一致は拡張子を保ったまま同名になるので、変更もログも不要
            MatchTier::Exact => {
                debug!("正式名のまま: {}", file.file_name);
                self.summary.already_canonical += 1;
            }
            MatchTier::None => {
                let log = self.renamer.apply(&Action::NoMatch, file);
                self.finish(log);
            }
            MatchTier::Token | MatchTier::Fallback => {
                if candidates.tier == MatchTier::Fallback {
                    println!("  {} は部分一致の候補のみ ({}件)", file.file_name, candidates.len());
                }
                let action = self.resolve(file, candidates)?;
                let log = self.renamer.apply(&action, file);
                self.finish(log);
            }
        }

        Ok(())
    }

    /// 操作者の入力で候補を確定
    fn resolve(&mut self, file: &LocalFile, candidates: CandidateList) -> Result<Action> {
        let mut session = ResolutionSession::new(file.entry.clone(), candidates)?;

        loop {
            let prompt = format!(
                "{} → {} [{}/{}] - ({}): ",
                file.file_name,
                session.target_name(),
                session.cursor() + 1,
                session.len(),
                Decision::KEYS
            );
            let key = self.decisions.read_key(&prompt)?;

            let renamer = &self.renamer;
            match session.apply_key(key, |target| renamer.target_exists(&file.path, target)) {
                Transition::Moved { cursor } => debug!("候補 {}/{}", cursor + 1, session.len()),
                Transition::Collision { target } => println!(
                    "⚠ {} は既に存在します。'd' で '{}' を付けてリネームできます",
                    target,
                    renamer.deletable_prefix()
                ),
                Transition::Invalid(_) => {
                    println!("無効なキーです。{} のいずれかを押してください", Decision::KEYS)
                }
                Transition::Resolved(action) => return Ok(action),
            }
        }
    }

    fn finish(&mut self, log: LogEntry) {
        report_outcome(&log);
        self.summary.record(log);
    }
}

fn report_outcome(log: &LogEntry) {
    let original = &log.original_name;
    match &log.outcome {
        Outcome::Renamed(name) => println!("✔ リネーム完了: {} -> {}", original, name),
        Outcome::MarkedDeletable(name) => {
            println!("✔ 削除候補としてリネーム: {} -> {}", original, name)
        }
        Outcome::LeftUnchanged => println!("  スキップ: {}", original),
        Outcome::SkippedExists(name) => {
            println!("⚠ {} は既に存在するためスキップ: {}", name, original)
        }
        Outcome::NoMatch => println!("⚠ 一致する名前がありません: {}", original),
        Outcome::RenameFailed(reason) => eprintln!("✖ リネーム失敗: {}: {}", original, reason),
    }
}

/// 全ファイルを処理して集計を返す（途中で失敗してもそれまでの集計は返る）
pub fn run<F: FileOps, D: DecisionSource>(
    matcher: &Matcher,
    renamer: Renamer<'_, F>,
    decisions: &mut D,
    files: &[LocalFile],
) -> (RunSummary, Result<()>) {
    let mut pipeline = Pipeline::new(matcher, renamer, decisions);
    let result = pipeline.process_all(files);
    (pipeline.into_summary(), result)
}

pub fn print_summary(summary: &RunSummary) {
    if !summary.changes_needed() {
        println!("\n✔ すべてのファイルが既に正式名です");
        return;
    }

    println!("\n結果 ({}件):", summary.processed());
    println!("  リネーム: {}", summary.renamed);
    println!("  削除候補: {}", summary.marked_deletable);
    println!("  スキップ: {}", summary.left_unchanged);
    println!("  既存のためスキップ: {}", summary.skipped_exists);
    println!("  一致なし: {}", summary.no_match);
    println!("  正式名のまま: {}", summary.already_canonical);
    if summary.failed > 0 {
        println!("  失敗: {}", summary.failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ScriptedDecisions;
    use crate::fs_ops::LocalFs;
    use crate::scanner::scan_folder;
    use rom_renamer_common::{MatchOptions, Normalizer};
    use tempfile::tempdir;

    fn matcher(names: &[&str]) -> Matcher {
        Matcher::from_names(names.iter().copied(), Normalizer::default(), MatchOptions::default())
            .unwrap()
    }

    #[test]
    fn test_reject_moves_to_next_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("contra.nes"), b"").unwrap();
        std::fs::write(dir.path().join("tetris.gb"), b"").unwrap();

        let m = matcher(&["Contra (USA)", "Tetris (World)"]);
        let files = scan_folder(dir.path(), &[]).unwrap();
        let mut keys = ScriptedDecisions::new("ny");
        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");

        let (summary, result) = run(&m, renamer, &mut keys, &files);
        result.unwrap();

        assert_eq!(summary.left_unchanged, 1);
        assert_eq!(summary.renamed, 1);
        assert!(dir.path().join("contra.nes").exists());
        assert!(dir.path().join("Tetris (World).gb").exists());
        assert_eq!(keys.remaining(), 0);
    }

    #[test]
    fn test_collision_reprompts_then_mark_deletable() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("contra_usa.nes"), b"new").unwrap();
        std::fs::write(dir.path().join("Contra (USA).nes"), b"old").unwrap();

        let m = matcher(&["Contra (USA)"]);
        let files = scan_folder(dir.path(), &[]).unwrap();
        // "Contra (USA).nes" は完全一致なので入力不要、contra_usa.nes は y → 衝突 → d
        let mut keys = ScriptedDecisions::new("yd");
        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");

        let (summary, result) = run(&m, renamer, &mut keys, &files);
        result.unwrap();

        assert_eq!(summary.already_canonical, 1);
        assert_eq!(summary.marked_deletable, 1);
        assert_eq!(keys.prompts().len(), 2);
        assert!(dir.path().join("_deletable_Contra (USA).nes").exists());
        assert_eq!(std::fs::read(dir.path().join("Contra (USA).nes")).unwrap(), b"old");
    }

    #[test]
    fn test_interrupted_input_keeps_partial_summary() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a_contra.nes"), b"").unwrap();
        std::fs::write(dir.path().join("b_tetris.gb"), b"").unwrap();

        let m = matcher(&["Contra (USA)", "Tetris (World)"]);
        let files = scan_folder(dir.path(), &[]).unwrap();
        // 1件目だけ入力があり、2件目で入力が尽きる
        let mut keys = ScriptedDecisions::new("y");
        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");

        let (summary, result) = run(&m, renamer, &mut keys, &files);
        assert!(result.is_err());
        assert_eq!(summary.renamed, 1);
        assert!(dir.path().join("Contra (USA).nes").exists());
        assert!(dir.path().join("b_tetris.gb").exists());
    }

    #[test]
    fn test_prompt_shows_position() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("mario kart.sfc"), b"").unwrap();

        let m = matcher(&["Mario Kart (USA)", "Mario Kart (Europe)"]);
        let files = scan_folder(dir.path(), &[]).unwrap();
        let mut keys = ScriptedDecisions::new("rn");
        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");

        let (_, result) = run(&m, renamer, &mut keys, &files);
        result.unwrap();

        assert_eq!(
            keys.prompts(),
            &[
                "mario kart.sfc → Mario Kart (USA).sfc [1/2] - (y/n/r/b/d): ",
                "mario kart.sfc → Mario Kart (Europe).sfc [2/2] - (y/n/r/b/d): ",
            ]
        );
    }
}
