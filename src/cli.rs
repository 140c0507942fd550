use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rom-renamer")]
#[command(about = "ROMファイル名を正式名に揃えるツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内のROMを正式名にリネーム（対話式）
    Rename {
        /// ROMフォルダのパス（省略時は対話入力）
        folder: Option<PathBuf>,

        /// システム名（例: "Nintendo - Game Boy"、省略時は対話選択）
        #[arg(short, long)]
        system: Option<String>,

        /// 正式名の一覧ファイル（1行1件、指定時はダウンロードしない）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// ドライラン（リネームせず結果だけ表示）
        #[arg(long)]
        dry_run: bool,
    },

    /// 1件のファイル名を照合して候補を表示
    Match {
        /// ファイル名（拡張子なし）
        #[arg(required = true)]
        name: String,

        /// システム名
        #[arg(short, long, required_unless_present = "catalog")]
        system: Option<String>,

        /// 正式名の一覧ファイル
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対応コンソールの一覧を表示
    Consoles,

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// カタログ取得元のURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を初期値に戻す
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename() {
        let cli = Cli::parse_from([
            "rom-renamer",
            "rename",
            "/roms/gb",
            "--system",
            "Nintendo - Game Boy",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Rename { folder, system, catalog, dry_run } => {
                assert_eq!(folder, Some(PathBuf::from("/roms/gb")));
                assert_eq!(system.as_deref(), Some("Nintendo - Game Boy"));
                assert!(catalog.is_none());
                assert!(dry_run);
            }
            _ => panic!("rename として解析されていない"),
        }
    }

    #[test]
    fn test_match_requires_source() {
        assert!(Cli::try_parse_from(["rom-renamer", "match", "tetris"]).is_err());
        assert!(Cli::try_parse_from(["rom-renamer", "match", "tetris", "-c", "list.txt"]).is_ok());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["rom-renamer", "consoles", "-v"]);
        assert!(cli.verbose);
    }
}
