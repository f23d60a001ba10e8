//! 行抽出
//!
//! 貼り付け内容を行（セル文字列の並び）に分解する。
//!
//! 抽出優先順位:
//! 1. `<tr>` / `<td>` を含む場合はHTMLテーブルとして抽出
//! 2. HTMLで1行も取れない、またはHTMLでない場合はテキスト表として抽出

use crate::normalizer::normalize;
use crate::types::RawRow;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref ROW_RE: Regex = Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap();
    static ref CELL_RE: Regex = Regex::new(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]>").unwrap();
    // タブ、または2つ以上の連続空白で列を区切る
    static ref COLUMN_GAP_RE: Regex = Regex::new(r"\t|\s{2,}").unwrap();
}

/// 行を取り出した経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    Markup,
    Text,
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub path: ExtractionPath,
    pub rows: Vec<RawRow>,
}

/// 貼り付け内容から行を抽出する（行が無ければ空のVec）
pub fn extract_rows(content: &str) -> Vec<RawRow> {
    extract(content).rows
}

/// 経路付きで行を抽出する
pub fn extract(content: &str) -> Extraction {
    if has_table_markup(content) {
        let rows = extract_markup_rows(content);
        if !rows.is_empty() {
            debug!("markup path: {} rows", rows.len());
            return Extraction {
                path: ExtractionPath::Markup,
                rows,
            };
        }
        debug!("markup markers found but no complete rows, falling back to text path");
    }

    let rows = extract_text_rows(content);
    debug!("text path: {} rows", rows.len());
    Extraction {
        path: ExtractionPath::Text,
        rows,
    }
}

/// テーブル行・セルのタグを含むか（大文字小文字を区別しない）
pub fn has_table_markup(content: &str) -> bool {
    let lower = content.to_lowercase();
    lower.contains("<tr") || lower.contains("<td")
}

fn extract_markup_rows(content: &str) -> Vec<RawRow> {
    ROW_RE
        .captures_iter(content)
        .map(|row| {
            CELL_RE
                .captures_iter(&row[1])
                .map(|cell| normalize(&cell[1]))
                .collect::<RawRow>()
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn extract_text_rows(content: &str) -> Vec<RawRow> {
    content
        .lines()
        .map(split_text_line)
        .filter(|cells| cells.len() >= 2)
        .collect()
}

fn split_text_line(line: &str) -> RawRow {
    let cells = normalized_tokens(COLUMN_GAP_RE.split(line));
    if cells.len() >= 2 {
        return cells;
    }
    normalized_tokens(line.split_whitespace())
}

fn normalized_tokens<'a>(parts: impl Iterator<Item = &'a str>) -> RawRow {
    parts
        .map(normalize)
        .filter(|cell| !cell.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // HTMLテーブル
    // =============================================

    #[test]
    fn test_markup_rows_and_cells() {
        let html = r##"<table>
            <tr><th>Pos</th><th>Atleta</th><th>Tot</th></tr>
            <tr class="odd"><td>1</td><td><a href="#">ROSSI MARIO</a></td><td>1.234</td></tr>
        </table>"##;

        let extraction = extract(html);
        assert_eq!(extraction.path, ExtractionPath::Markup);
        assert_eq!(extraction.rows.len(), 2);
        assert_eq!(extraction.rows[0], vec!["Pos", "Atleta", "Tot"]);
        assert_eq!(extraction.rows[1], vec!["1", "ROSSI MARIO", "1.234"]);
    }

    #[test]
    fn test_markup_is_case_insensitive() {
        let html = "<TR><TD>2</TD><TD>BIANCHI&nbsp;LUCA</TD></TR>";
        let rows = extract_rows(html);
        assert_eq!(rows, vec![vec!["2".to_string(), "BIANCHI LUCA".to_string()]]);
    }

    #[test]
    fn test_markup_keeps_empty_cells() {
        let html = "<tr><td>1</td><td></td><td>SMITH JOHN</td><td></td><td>185</td></tr>";
        let rows = extract_rows(html);
        assert_eq!(rows[0], vec!["1", "", "SMITH JOHN", "", "185"]);
    }

    #[test]
    fn test_markup_drops_rows_without_cells() {
        let html = "<tr></tr><tr><td>1</td><td>VERDI ANNA</td></tr>";
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_markup_without_rows_falls_back_to_text() {
        // <td> はあるが <tr> で閉じていない
        let content = "<td>broken\n1\tROSSI MARIO\t190";
        let extraction = extract(content);
        assert_eq!(extraction.path, ExtractionPath::Text);
        assert!(extraction.rows.iter().any(|r| r.contains(&"ROSSI MARIO".to_string())));
    }

    #[test]
    fn test_thead_is_not_a_cell() {
        let html = "<table><thead><tr><th>POS</th><th>NOME</th></tr></thead></table>";
        let rows = extract_rows(html);
        assert_eq!(rows, vec![vec!["POS".to_string(), "NOME".to_string()]]);
    }

    // =============================================
    // テキスト表
    // =============================================

    #[test]
    fn test_text_tab_separated() {
        let content = "1\tROSSI MARIO\t190\t210\n2\tBIANCHI LUCA\t180\t200\n";
        let extraction = extract(content);
        assert_eq!(extraction.path, ExtractionPath::Text);
        assert_eq!(extraction.rows.len(), 2);
        assert_eq!(extraction.rows[0], vec!["1", "ROSSI MARIO", "190", "210"]);
    }

    #[test]
    fn test_text_multi_space_separated() {
        let rows = extract_rows("1   ROSSI MARIO   190");
        assert_eq!(rows[0], vec!["1", "ROSSI MARIO", "190"]);
    }

    #[test]
    fn test_text_single_space_fallback() {
        let rows = extract_rows("1 ROSSI 190");
        assert_eq!(rows[0], vec!["1", "ROSSI", "190"]);
    }

    #[test]
    fn test_text_drops_noise_lines() {
        let rows = extract_rows("CLASSIFICA\n\n1\tROSSI MARIO\n   \n");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_empty_content() {
        assert!(extract_rows("").is_empty());
        assert!(extract_rows("   \n\t \n").is_empty());
    }
}
