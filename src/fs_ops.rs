//! ファイル操作
//!
//! リネームは移動先が既に存在する場合 `AlreadyExists` で失敗する（上書きしない）。

use log::debug;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

pub trait FileOps {
    fn exists(&self, path: &Path) -> bool;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// 2つのパスが同じファイルを指すか（大文字小文字を区別しないFSでの表記違いなど）
    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// 実ファイルシステム
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileOps for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        // 大文字小文字のみの変更は同一ファイルを指すことがある
        if to.exists() && !self.same_file(from, to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} は既に存在します", to.display()),
            ));
        }
        debug!("rename {} -> {}", from.display(), to.display());
        std::fs::rename(from, to)
    }
}

/// ドライラン（実ファイルは変更せず、計画だけ記録する）
#[derive(Debug, Default)]
pub struct DryRunFs {
    moved_away: RefCell<HashSet<PathBuf>>,
    planned: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl DryRunFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 計画されたリネーム（実行順）
    pub fn planned(&self) -> Vec<(PathBuf, PathBuf)> {
        self.planned.borrow().clone()
    }
}

impl FileOps for DryRunFs {
    fn exists(&self, path: &Path) -> bool {
        if self.moved_away.borrow().contains(path) {
            return false;
        }
        path.exists() || self.planned.borrow().iter().any(|(_, to)| to == path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.exists(to) && !self.same_file(from, to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} は既に存在します", to.display()),
            ));
        }
        if !self.exists(from) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} が見つかりません", from.display()),
            ));
        }
        {
            let mut moved_away = self.moved_away.borrow_mut();
            moved_away.insert(from.to_path_buf());
            moved_away.remove(to);
        }
        self.planned
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_rename() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.nes");
        let to = dir.path().join("A (USA).nes");
        std::fs::write(&from, b"rom").unwrap();

        LocalFs.rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"rom");
    }

    #[test]
    fn test_local_rename_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.nes");
        let to = dir.path().join("b.nes");
        std::fs::write(&from, b"a").unwrap();
        std::fs::write(&to, b"b").unwrap();

        let err = LocalFs.rename(&from, &to).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(&to).unwrap(), b"b");
        assert!(from.exists());
    }

    #[test]
    fn test_dry_run_tracks_plan_without_touching_disk() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.nes");
        let to = dir.path().join("Alpha (USA).nes");
        std::fs::write(&from, b"a").unwrap();

        let fs = DryRunFs::new();
        fs.rename(&from, &to).unwrap();

        assert!(from.exists());
        assert!(!to.exists());
        assert!(fs.exists(&to));
        assert!(!fs.exists(&from));
        assert_eq!(fs.planned(), vec![(from.clone(), to.clone())]);

        // 計画済みの移動先には重ねられない
        let other = dir.path().join("b.nes");
        std::fs::write(&other, b"b").unwrap();
        let err = fs.rename(&other, &to).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
