//! カタログ取得モジュール
//!
//! libretroサムネイルサーバーの `Named_Boxarts/` ディレクトリ一覧から
//! 正式名を取り出す。リトライはしない（失敗時はその実行を中止）。

use crate::error::{Result, RomRenamerError};
use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::path::Path;
use std::time::Duration;

const BOXART_DIR: &str = "Named_Boxarts";
const IMAGE_SUFFIX: &str = ".png";

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"(?i)href\s*=\s*["']([^"']*)["']"#).unwrap();
}

/// カタログのURL（システム名はパーセントエンコード）
pub fn catalog_url(base_url: &str, system: &str) -> String {
    format!(
        "{}/{}/{}/",
        base_url.trim_end_matches('/'),
        urlencoding::encode(system),
        BOXART_DIR
    )
}

/// ディレクトリ一覧HTMLから正式名を抽出（出現順）
///
/// `.png` で終わるリンクのみ対象。URLデコードして拡張子を除去する。
pub fn parse_listing(html: &str) -> Vec<String> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter_map(|href| href.strip_suffix(IMAGE_SUFFIX))
        .map(|stem| stem.rsplit('/').next().unwrap_or(stem))
        .map(|stem| match urlencoding::decode(stem) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => stem.to_string(),
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// サーバーからカタログを取得
pub async fn fetch_catalog(base_url: &str, system: &str, timeout: Duration) -> Result<Vec<String>> {
    let url = catalog_url(base_url, system);
    debug!("GET {}", url);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("{} のカタログを取得中...", system));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = download(&url, timeout).await;
    spinner.finish_and_clear();

    let body = result?;
    let names = parse_listing(&body);
    debug!("{} 件の正式名を抽出", names.len());
    Ok(names)
}

async fn download(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RomRenamerError::CatalogFetch(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RomRenamerError::CatalogFetch(format!("{}: HTTP {}", url, status)));
    }

    response
        .text()
        .await
        .map_err(|e| RomRenamerError::CatalogFetch(format!("{}: {}", url, e)))
}

/// ローカルのカタログファイルを読み込み（1行1件、空行は無視）
pub fn load_catalog_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(RomRenamerError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect())
}
