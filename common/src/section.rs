//! 部門（カテゴリ）バナー行の追跡
//!
//! 成績表の途中に挟まる「ECCELLENZA」「FEMMINILE」などの見出し行を検出し、
//! 以降のデータ行に部門名を付ける。部門は次のバナー行まで継続する。

use crate::options::ParseOptions;
use crate::types::RawRow;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// 組み込みの部門キーワード
pub const SECTION_KEYWORDS: &[&str] = &[
    "ECCELLENZA", "CADETTI", "FEMMINILE", "GENTLEMAN", "M/A", "M/B", "M/C", "F/A", "WOMEN",
    "SENIORS",
];

/// バナー行とみなす最大セル数（これ未満）
const BANNER_MAX_CELLS: usize = 3;

lazy_static! {
    static ref PAGE_NOISE_RE: Regex = Regex::new(r"(?:PAGINA|PAGE)\s+\d+").unwrap();
}

/// 部門トラッカー（解析ごとに新規作成）
#[derive(Debug, Clone)]
pub struct SectionTracker {
    keywords: Vec<String>,
    current: Option<String>,
}

impl SectionTracker {
    pub fn new(options: &ParseOptions) -> Self {
        let keywords = SECTION_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .chain(options.extra_section_keywords.iter().map(|k| k.trim().to_uppercase()))
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            keywords,
            current: None,
        }
    }

    /// バナー行なら部門名を返す（ページ番号は除去）
    pub fn banner_label(&self, row: &RawRow) -> Option<String> {
        if row.is_empty() || row.len() >= BANNER_MAX_CELLS {
            return None;
        }
        let joined = row.join(" ").to_uppercase();
        if !self.keywords.iter().any(|k| joined.contains(k.as_str())) {
            return None;
        }
        let label = PAGE_NOISE_RE.replace_all(&joined, "");
        Some(crate::normalizer::collapse_whitespace(&label))
    }

    /// 行を確認し、バナー行なら現在の部門を更新して true を返す
    pub fn observe(&mut self, row: &RawRow) -> bool {
        match self.banner_label(row) {
            Some(label) => {
                debug!("section: {}", label);
                self.current = Some(label);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
