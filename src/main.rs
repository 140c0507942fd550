use clap::Parser;
use log::{debug, warn, LevelFilter};
use rom_renamer::{
    cli, config, consoles, decision, error, fetcher, fs_ops, pipeline, renamer, report, scanner,
};
use cli::{Cli, Commands};
use config::Config;
use decision::{DecisionSource, TerminalDecisions};
use error::{Result, RomRenamerError};
use fs_ops::{DryRunFs, FileOps, LocalFs};
use rom_renamer_common::{token_equivalent, Matcher};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut clog = colog::default_builder();
    clog.filter(None, if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    clog.init();

    let config = Config::load()?;

    match cli.command {
        Commands::Rename { folder, system, catalog, dry_run } => {
            println!("🎮 rom-renamer - リネーム{}\n", if dry_run { " (ドライラン)" } else { "" });

            // 1キー入力ができない環境では何も始めない
            let mut keys = TerminalDecisions::new()?;

            let system = match (system, &catalog) {
                (Some(system), _) => {
                    if consoles::find_category(&system).is_none() {
                        warn!("一覧にないシステム名です: {}", system.trim());
                    }
                    consoles::canonical_system_name(&system)
                }
                (None, Some(path)) => path.display().to_string(),
                (None, None) => consoles::select_system_interactive()?,
            };
            let folder = match folder {
                Some(folder) => folder,
                None => consoles::prompt_folder(&system)?,
            };
            if !folder.is_dir() {
                return Err(RomRenamerError::FolderNotFound(folder.display().to_string()));
            }

            // 1. カタログ取得
            println!("[1/3] 正式名の一覧を取得中...");
            let matcher = build_matcher(&config, &system, catalog.as_deref()).await?;
            println!("✔ {}件の正式名を取得\n", matcher.catalog().len());

            // 2. ファイル走査
            println!("[2/3] ファイルをスキャン中...");
            let files = scanner::scan_folder(&folder, &[config.log_file_name.as_str()])?;
            println!("✔ {}件のファイルを検出\n", files.len());

            if files.is_empty() {
                println!("処理対象のファイルがありません");
                return Ok(());
            }

            // 3. 照合・リネーム
            println!("[3/3] 照合中...\n");
            if dry_run {
                let fs = DryRunFs::new();
                let summary =
                    rename_files(&config, &matcher, &folder, &fs, &mut keys, &files, false)?;
                for (from, to) in fs.planned() {
                    println!("  {} -> {}", file_name(&from), file_name(&to));
                }
                debug!("ドライランのためログは書き出さない ({}件)", summary.log.len());
            } else {
                rename_files(&config, &matcher, &folder, &LocalFs, &mut keys, &files, true)?;
            }

            println!("\n✅ 完了");
        }

        Commands::Match { name, system, catalog, json } => {
            let system = system.map(|s| consoles::canonical_system_name(&s)).unwrap_or_default();
            let matcher = build_matcher(&config, &system, catalog.as_deref()).await?;
            let candidates = matcher.match_name(&name);

            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else if candidates.is_empty() {
                println!("一致する名前がありません: {}", name);
            } else {
                let normalizer = config.normalizer();
                let query_tokens = normalizer.normalize(&name);
                println!("{} ({}):", name, candidates.tier);
                for (idx, candidate) in candidates.iter().enumerate() {
                    // 語順だけが違う候補には印を付ける
                    let tokens = normalizer.normalize(&candidate.canonical_name);
                    let mark = if token_equivalent(&query_tokens, &tokens) { " ≡" } else { "" };
                    println!(
                        "  {:>2}. {}{} (トークン一致: {}, 類似度: {:.2})",
                        idx + 1,
                        candidate.canonical_name,
                        mark,
                        candidate.matched_token_count,
                        candidate.similarity_score
                    );
                }
            }
        }

        Commands::Consoles => {
            for category in consoles::CATEGORIES {
                println!("{}:", category.name);
                for system in category.systems {
                    println!("  {}", system);
                }
            }
        }

        Commands::Config { show, set_base_url, reset } => {
            let mut config = config;

            if reset {
                config = Config::default();
                config.save()?;
                println!("✔ 設定を初期化しました");
            }

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ カタログ取得元を設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  カタログ取得元: {}", config.catalog_base_url);
                println!("  トークン類似度の閾値: {}", config.token_threshold);
                println!("  カバー率の閾値: {}", config.coverage_threshold);
                println!("  部分一致の最大候補数: {}", config.fallback_limit);
                println!("  削除候補プレフィックス: {}", config.deletable_prefix);
                println!("  ログファイル名: {}", config.log_file_name);
                println!("  除外語: {}", config.stop_words.join(", "));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

/// カタログを読み込んで照合器を作る（一覧ファイル優先）
async fn build_matcher(config: &Config, system: &str, catalog: Option<&Path>) -> Result<Matcher> {
    let names = match catalog {
        Some(path) => fetcher::load_catalog_file(path)?,
        None => {
            fetcher::fetch_catalog(
                &config.catalog_base_url,
                system,
                Duration::from_secs(config.timeout_seconds),
            )
            .await?
        }
    };

    if names.is_empty() {
        let source = catalog
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| system.to_string());
        return Err(RomRenamerError::EmptyCatalog(source));
    }

    Ok(Matcher::from_names(names, config.normalizer(), config.match_options())?)
}

/// 対話リネームを実行し、中断時もそこまでのログを残す
fn rename_files<F: FileOps, D: DecisionSource>(
    config: &Config,
    matcher: &Matcher,
    folder: &Path,
    fs: &F,
    keys: &mut D,
    files: &[scanner::LocalFile],
    write_log: bool,
) -> Result<pipeline::RunSummary> {
    let renamer = renamer::Renamer::new(folder, fs, &config.deletable_prefix);

    let (summary, result) = pipeline::run(matcher, renamer, keys, files);
    pipeline::print_summary(&summary);

    if write_log {
        if let Some(path) = report::write_log(folder, &config.log_file_name, &summary.log)? {
            println!("✔ ログを保存: {}", path.display());
        }
    }

    result.map(|()| summary)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
