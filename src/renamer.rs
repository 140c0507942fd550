//! 確定アクションの適用
//!
//! - 採用: `<候補名><拡張子>` へリネーム
//! - 削除候補: `<プレフィックス><候補名><拡張子>` へリネーム
//! - スキップ・候補なし: ファイル操作なし
//!
//! リネーム前に必ず移動先の存在を確認し、既存ファイルは上書きしない。

use crate::fs_ops::FileOps;
use crate::scanner::LocalFile;
use log::debug;
use rom_renamer_common::{Action, LocalEntry, LogEntry, Outcome};
use std::path::{Path, PathBuf};

pub struct Renamer<'a, F: FileOps> {
    folder: PathBuf,
    fs: &'a F,
    deletable_prefix: String,
}

impl<'a, F: FileOps> Renamer<'a, F> {
    pub fn new(folder: &Path, fs: &'a F, deletable_prefix: &str) -> Self {
        Self {
            folder: folder.to_path_buf(),
            fs,
            deletable_prefix: deletable_prefix.to_string(),
        }
    }

    pub fn deletable_prefix(&self) -> &str {
        &self.deletable_prefix
    }

    /// リネーム先が別ファイルとして既に存在するか
    ///
    /// 移動元と同じファイルを指す場合（表記の大文字小文字だけが違う等）は存在扱いしない。
    pub fn target_exists(&self, source: &Path, file_name: &str) -> bool {
        let target = self.folder.join(file_name);
        self.fs.exists(&target) && !self.fs.same_file(source, &target)
    }

    /// 削除候補のファイル名
    pub fn deletable_name(&self, entry: &LocalEntry, canonical_name: &str) -> String {
        format!("{}{}", self.deletable_prefix, entry.target_file_name(canonical_name))
    }

    /// アクションを適用してログ行を返す
    pub fn apply(&self, action: &Action, file: &LocalFile) -> LogEntry {
        let outcome = match action {
            Action::Accepted(candidate) => {
                let target = file.entry.target_file_name(candidate);
                self.rename_to(file, &target, Outcome::Renamed)
            }
            Action::MarkedDeletable(candidate) => {
                let target = self.deletable_name(&file.entry, candidate);
                self.rename_to(file, &target, Outcome::MarkedDeletable)
            }
            Action::Skipped => Outcome::LeftUnchanged,
            Action::NoMatch => Outcome::NoMatch,
        };
        LogEntry::new(file.file_name.clone(), outcome)
    }

    fn rename_to<W>(&self, file: &LocalFile, target: &str, wrap: W) -> Outcome
    where
        W: FnOnce(String) -> Outcome,
    {
        if self.target_exists(&file.path, target) {
            debug!("リネーム先が既に存在: {}", target);
            return Outcome::SkippedExists(target.to_string());
        }

        // 走査時の実パスから移動する（ファイル名が UTF-8 でなくても元のまま扱える）
        let to = self.folder.join(target);
        match self.fs.rename(&file.path, &to) {
            Ok(()) => wrap(target.to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("リネーム先が既に存在: {}", target);
                Outcome::SkippedExists(target.to_string())
            }
            Err(e) => {
                debug!("リネーム失敗: {} -> {}: {}", file.file_name, target, e);
                Outcome::RenameFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::LocalFs;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;
    use tempfile::tempdir;

    /// 大文字小文字を区別しないファイルシステム
    #[derive(Default)]
    struct CaseInsensitiveFs {
        files: RefCell<HashSet<String>>,
    }

    impl CaseInsensitiveFs {
        fn with_file(path: &Path) -> Self {
            let fs = Self::default();
            fs.files.borrow_mut().insert(Self::key(path));
            fs
        }

        fn key(path: &Path) -> String {
            path.to_string_lossy().to_lowercase()
        }
    }

    impl FileOps for CaseInsensitiveFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains(&Self::key(path))
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            if self.exists(to) && !self.same_file(from, to) {
                return Err(io::Error::from(io::ErrorKind::AlreadyExists));
            }
            let mut files = self.files.borrow_mut();
            files.remove(&Self::key(from));
            files.insert(Self::key(to));
            Ok(())
        }

        fn same_file(&self, a: &Path, b: &Path) -> bool {
            Self::key(a) == Self::key(b)
        }
    }

    #[test]
    fn test_accept_renames_with_extension() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Super_Mario_Bros.nes"), b"rom").unwrap();

        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(dir.path().join("Super_Mario_Bros.nes"));
        let log = renamer.apply(&Action::Accepted("Super Mario Bros (USA)".into()), &file);

        assert_eq!(log.outcome, Outcome::Renamed("Super Mario Bros (USA).nes".into()));
        assert!(dir.path().join("Super Mario Bros (USA).nes").exists());
        assert!(!dir.path().join("Super_Mario_Bros.nes").exists());
    }

    #[test]
    fn test_accept_collision_skips() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.nes"), b"a").unwrap();
        std::fs::write(dir.path().join("A Game.nes"), b"existing").unwrap();

        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(dir.path().join("a.nes"));
        let log = renamer.apply(&Action::Accepted("A Game".into()), &file);

        assert_eq!(log.outcome, Outcome::SkippedExists("A Game.nes".into()));
        assert!(dir.path().join("a.nes").exists());
        assert_eq!(std::fs::read(dir.path().join("A Game.nes")).unwrap(), b"existing");
    }

    #[test]
    fn test_mark_deletable_prefixes_candidate() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("game.rom"), b"rom").unwrap();

        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(dir.path().join("game.rom"));
        let log = renamer.apply(&Action::MarkedDeletable("Game Title".into()), &file);

        assert_eq!(log.outcome, Outcome::MarkedDeletable("_deletable_Game Title.rom".into()));
        assert!(dir.path().join("_deletable_Game Title.rom").exists());
        assert!(!dir.path().join("game.rom").exists());
    }

    #[test]
    fn test_mark_deletable_collision_skips() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("game.rom"), b"rom").unwrap();
        std::fs::write(dir.path().join("_deletable_Game Title.rom"), b"old").unwrap();

        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(dir.path().join("game.rom"));
        let log = renamer.apply(&Action::MarkedDeletable("Game Title".into()), &file);

        assert_eq!(
            log.outcome,
            Outcome::SkippedExists("_deletable_Game Title.rom".into())
        );
        assert!(dir.path().join("game.rom").exists());
    }

    #[test]
    fn test_skip_and_no_match_touch_nothing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ff7.bin"), b"rom").unwrap();

        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(dir.path().join("ff7.bin"));

        let log = renamer.apply(&Action::NoMatch, &file);
        assert_eq!(log.to_string(), "ff7.bin → No match");

        let log = renamer.apply(&Action::Skipped, &file);
        assert_eq!(log.to_string(), "ff7.bin → Left unchanged");

        assert!(dir.path().join("ff7.bin").exists());
    }

    #[test]
    fn test_missing_source_reports_failure() {
        let dir = tempdir().unwrap();
        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(dir.path().join("gone.nes"));
        let log = renamer.apply(&Action::Accepted("Gone".into()), &file);
        assert!(matches!(log.outcome, Outcome::RenameFailed(_)));
    }

    #[test]
    fn test_case_only_rename_is_not_collision() {
        let folder = Path::new("/roms");
        let source = folder.join("tetris (world).gb");
        let fs = CaseInsensitiveFs::with_file(&source);

        let renamer = Renamer::new(folder, &fs, "_deletable_");
        let file = LocalFile::new(source.clone());
        assert!(!renamer.target_exists(&source, "Tetris (World).gb"));

        let log = renamer.apply(&Action::Accepted("Tetris (World)".into()), &file);
        assert_eq!(log.outcome, Outcome::Renamed("Tetris (World).gb".into()));
    }

    #[test]
    fn test_other_file_with_different_case_is_collision() {
        let folder = Path::new("/roms");
        let fs = CaseInsensitiveFs::with_file(&folder.join("tetris_world.gb"));
        fs.files.borrow_mut().insert("/roms/tetris (world).gb".into());

        let renamer = Renamer::new(folder, &fs, "_deletable_");
        let file = LocalFile::new(folder.join("tetris_world.gb"));
        let log = renamer.apply(&Action::Accepted("Tetris (World)".into()), &file);
        assert_eq!(log.outcome, Outcome::SkippedExists("Tetris (World).gb".into()));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_renamed_from_scanned_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let source = dir.path().join(OsStr::from_bytes(b"Tetris\xff.gb"));
        std::fs::write(&source, b"rom").unwrap();

        let renamer = Renamer::new(dir.path(), &LocalFs, "_deletable_");
        let file = LocalFile::new(source.clone());
        let log = renamer.apply(&Action::Accepted("Tetris (World)".into()), &file);

        assert_eq!(log.outcome, Outcome::Renamed("Tetris (World).gb".into()));
        assert!(!source.exists());
        assert_eq!(std::fs::read(dir.path().join("Tetris (World).gb")).unwrap(), b"rom");
    }
}
