//! ROM Renamer
//!
//! フォルダ内のROMファイル名をカタログの正式名に揃える。
//! 照合エンジンは `rom_renamer_common`、ここではIO（取得・走査・リネーム・ログ）を扱う。

pub mod cli;
pub mod config;
pub mod consoles;
pub mod decision;
pub mod error;
pub mod fetcher;
pub mod fs_ops;
pub mod pipeline;
pub mod renamer;
pub mod report;
pub mod scanner;
