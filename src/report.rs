//! 処理ログの書き出し
//!
//! 変更・未一致があったファイルのみ1行ずつ追記する。
//! 該当がなければファイルは作成しない。

use crate::error::Result;
use rom_renamer_common::LogEntry;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn write_log(folder: &Path, file_name: &str, entries: &[LogEntry]) -> Result<Option<PathBuf>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let path = folder.join(file_name);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        writeln!(writer, "{}", entry)?;
    }
    writer.flush()?;

    Ok(Some(path))
}
