//! セル文字列の正規化
//!
//! 貼り付けられた成績表のセルを比較可能な形にそろえる。
//!
//! ## 処理フロー
//! 1. `<...>` タグの除去
//! 2. 文字実体参照のデコード（未知の名前付き参照は削除）
//! 3. 制御文字を空白に置換
//! 4. NFD分解してダイアクリティカルマークを除去
//! 5. 連続空白を1つにまとめ、前後をトリム

pub mod numbers;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref LEFTOVER_ENTITY_RE: Regex = Regex::new(r"&[A-Za-z][A-Za-z0-9]*;").unwrap();
}

/// セル文字列を正規化する（全入力に対して定義され、失敗しない）
pub fn normalize(cell: &str) -> String {
    if cell.is_empty() {
        return String::new();
    }

    let without_tags = TAG_RE.replace_all(cell, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    let decoded = LEFTOVER_ENTITY_RE.replace_all(&decoded, "");

    let folded: String = decoded
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    collapse_whitespace(&folded)
}

/// 連続空白を1つにまとめ、前後をトリム
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 氏名照合用のキー（大文字・アクセント除去・A-Z以外を削除）
///
/// "D'Angelo Àlvaro" → "DANGELOALVARO"
pub fn fold_name(name: &str) -> String {
    name.to_uppercase()
        .nfd()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_tags() {
        assert_eq!(normalize("<b>ROSSI</b> <i>MARIO</i>"), "ROSSI MARIO");
        assert_eq!(normalize("<a href=\"x.php?id=3\">185</a>"), "185");
    }

    #[test]
    fn test_normalize_decodes_entities() {
        assert_eq!(normalize("ROSSI&nbsp;MARIO"), "ROSSI MARIO");
        assert_eq!(normalize("A&amp;B"), "A&B");
        assert_eq!(normalize("D&#39;ANGELO"), "D'ANGELO");
        assert_eq!(normalize("X&bogus;Y"), "XY");
    }

    #[test]
    fn test_normalize_folds_accents() {
        assert_eq!(normalize("Niccolò Pérez"), "Niccolo Perez");
        assert_eq!(normalize("ÀÈÌÒÙ"), "AEIOU");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  ROSSI \t\n  MARIO\r\n"), "ROSSI MARIO");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("<td></td>"), "");
    }

    #[test]
    fn test_fold_name() {
        assert_eq!(fold_name("D'Angelo Àlvaro"), "DANGELOALVARO");
        assert_eq!(fold_name("smith, john"), "SMITHJOHN");
        assert_eq!(fold_name("123"), "");
    }

    #[test]
    fn test_accented_and_plain_compare_equal() {
        assert_eq!(fold_name(&normalize("Gesù")), fold_name("GESU"));
    }
}
