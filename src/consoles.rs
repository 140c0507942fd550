//! コンソール選択モジュール
//!
//! libretroサムネイルサーバーのシステム名一覧と対話式選択

use crate::error::{Result, RomRenamerError};
use dialoguer::{Input, Select};
use std::path::PathBuf;

/// コンソールのカテゴリ
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub systems: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Atari",
        systems: &[
            "Atari - 8-bit",
            "Atari - 2600",
            "Atari - 5200",
            "Atari - 7800",
            "Atari - Jaguar",
            "Atari - Lynx",
            "Atari - ST",
        ],
    },
    Category {
        name: "Microsoft",
        systems: &[
            "DOS",
            "Microsoft - MSX",
            "Microsoft - MSX2",
            "Microsoft - Xbox",
            "Microsoft - Xbox 360",
        ],
    },
    Category {
        name: "Nintendo",
        systems: &[
            "Nintendo - Family Computer Disk System",
            "Nintendo - Game Boy",
            "Nintendo - Game Boy Advance",
            "Nintendo - Game Boy Color",
            "Nintendo - GameCube",
            "Nintendo - Nintendo 3DS",
            "Nintendo - Nintendo 64",
            "Nintendo - Nintendo 64DD",
            "Nintendo - Nintendo DS",
            "Nintendo - Nintendo DSi",
            "Nintendo - Nintendo Entertainment System",
            "Nintendo - Pokemon Mini",
            "Nintendo - Satellaview",
            "Nintendo - Sufami Turbo",
            "Nintendo - Super Nintendo Entertainment System",
            "Nintendo - Virtual Boy",
            "Nintendo - Wii",
            "Nintendo - Wii U",
        ],
    },
    Category {
        name: "Cabinet",
        systems: &[
            "Atomiswave",
            "FBNeo - Arcade Games",
            "MAME",
            "SNK - Neo Geo",
            "SNK - Neo Geo CD",
            "SNK - Neo Geo Pocket",
            "SNK - Neo Geo Pocket Color",
        ],
    },
    Category {
        name: "Sega",
        systems: &[
            "Sega - 32X",
            "Sega - Dreamcast",
            "Sega - Game Gear",
            "Sega - Master System - Mark III",
            "Sega - Mega-CD - Sega CD",
            "Sega - Mega Drive - Genesis",
            "Sega - Naomi",
            "Sega - Naomi 2",
            "Sega - SG-1000",
            "Sega - Saturn",
        ],
    },
    Category {
        name: "Sony",
        systems: &[
            "Sony - PlayStation",
            "Sony - PlayStation 2",
            "Sony - PlayStation 3",
            "Sony - PlayStation 4",
            "Sony - PlayStation Portable",
            "Sony - PlayStation Vita",
        ],
    },
];

const MANUAL_ENTRY: &str = "Other - Manual Insert";

/// システム名が属するカテゴリ（大文字小文字は無視）
pub fn find_category(system: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|c| c.systems.iter().any(|s| s.eq_ignore_ascii_case(system)))
}

/// 一覧表記に揃えたシステム名（一覧にない場合は入力のまま）
pub fn canonical_system_name(system: &str) -> String {
    let trimmed = system.trim();
    CATEGORIES
        .iter()
        .flat_map(|c| c.systems.iter())
        .find(|s| s.eq_ignore_ascii_case(trimmed))
        .map(|s| s.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// 対話式でシステム名を選択
pub fn select_system_interactive() -> Result<String> {
    let mut items: Vec<&str> = CATEGORIES.iter().map(|c| c.name).collect();
    items.push(MANUAL_ENTRY);

    let category_idx = Select::new()
        .with_prompt("コンソールのカテゴリを選択してください")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| RomRenamerError::Prompt(e.to_string()))?;

    let Some(category) = CATEGORIES.get(category_idx) else {
        let system: String = Input::new()
            .with_prompt("libretro のシステム名を入力してください")
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.trim().is_empty() {
                    Err("システム名が空です")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(|e| RomRenamerError::Prompt(e.to_string()))?;
        return Ok(canonical_system_name(&system));
    };

    let system_idx = Select::new()
        .with_prompt(format!("{} のコンソールを選択してください", category.name))
        .items(category.systems)
        .default(0)
        .interact()
        .map_err(|e| RomRenamerError::Prompt(e.to_string()))?;

    Ok(category.systems[system_idx].to_string())
}

/// 対話式でROMフォルダを入力（存在するフォルダのみ受け付ける）
pub fn prompt_folder(system: &str) -> Result<PathBuf> {
    let folder: String = Input::new()
        .with_prompt(format!("{} のROMフォルダのパス", system))
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if PathBuf::from(input.trim()).is_dir() {
                Ok(())
            } else {
                Err("フォルダが存在しません")
            }
        })
        .interact_text()
        .map_err(|e| RomRenamerError::Prompt(e.to_string()))?;

    Ok(PathBuf::from(folder.trim()))
}
