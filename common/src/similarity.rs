//! 文字列類似度
//!
//! 一致ブロック方式（Ratcliff/Obershelp）の比率 `2·M / (|a| + |b|)`。
//! `M` は最長共通ブロックを取り、その左右を再帰的に照合した一致文字数の合計。
//! 完全一致で 1.0、共通文字なしで 0.0。

/// トークン類似判定の既定閾値
pub const DEFAULT_TOKEN_THRESHOLD: f64 = 0.8;

/// 2つの文字列の類似比率（0.0〜1.0）
///
/// 両方空の場合は 1.0。
///
/// # Examples
/// ```
/// use rom_renamer_common::similarity::ratio;
///
/// assert_eq!(ratio("abcd", "bcde"), 0.75);
/// assert_eq!(ratio("mario", "mario"), 1.0);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// 2トークンが閾値以上に類似しているか
pub fn token_similar(a: &str, b: &str, threshold: f64) -> bool {
    if a == b {
        return true;
    }
    let la = a.chars().count();
    let lb = b.chars().count();
    // 長さだけで到達不可能な組は計算しない
    if upper_bound(la, lb) < threshold {
        return false;
    }
    ratio(a, b) >= threshold
}

/// 名前全体の類似度（大文字小文字を無視、正規化はしない）
///
/// 候補の同点解消にのみ使う。
pub fn name_similarity(a: &str, b: &str) -> f64 {
    ratio(&a.to_lowercase(), &b.to_lowercase())
}

fn upper_bound(la: usize, lb: usize) -> f64 {
    let total = la + lb;
    if total == 0 {
        return 1.0;
    }
    2.0 * la.min(lb) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// `a[alo..ahi]` と `b[blo..bhi]` の最長共通ブロック `(i, j, size)`
///
/// 同じ長さなら `a` 側、次に `b` 側で先に現れるものを返す。
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi.saturating_sub(blo) + 1;
    let mut best = (alo, blo, 0);
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = if a[i] == b[j] { prev[j - blo] + 1 } else { 0 };
            cur[j - blo + 1] = k;
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}
