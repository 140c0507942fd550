use crate::error::{Result, RomRenamerError};
use rom_renamer_common::LocalEntry;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct LocalFile {
    pub path: PathBuf,
    pub file_name: String,
    pub entry: LocalEntry,
}

impl LocalFile {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let entry = LocalEntry::from_file_name(&file_name);
        Self { path, file_name, entry }
    }
}

/// フォルダ直下のファイルを列挙（隠しファイルと `skip_names` は除外）
pub fn scan_folder(folder: &Path, skip_names: &[&str]) -> Result<Vec<LocalFile>> {
    if !folder.is_dir() {
        return Err(RomRenamerError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file = LocalFile::new(path.to_path_buf());
        if file.file_name.is_empty()
            || file.file_name.starts_with('.')
            || skip_names.contains(&file.file_name.as_str())
        {
            continue;
        }

        files.push(file);
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}
