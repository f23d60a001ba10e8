//! データ行の解釈
//!
//! 列対応表に従って1行から順位・氏名・ゲーム別スコア・合計・平均・チーム合計を読み取る。
//! 異常な行はエラーにせず、スキップまたは補完（順位の引き継ぎ、氏名の再探索）で扱う。

use crate::classifier::{is_header_token, ColumnMap};
use crate::normalizer::numbers::{
    digits_only, has_decimal_separator, integer_token, leading_int, looks_numeric, parse_decimal,
};
use crate::options::ParseOptions;
use crate::section::SectionTracker;
use crate::types::{RawResult, RawRow};
use lazy_static::lazy_static;
use regex::Regex;

/// 見出しの繰り返しを示す語
pub const HEADER_REPEAT_MARKERS: &[&str] =
    &["ATLETA", "POSIZIONE", "PAGINA", "ATHLETE", "POSITION", "PAGE"];

/// 表題行を示す語
pub const TITLE_MARKERS: &[&str] = &["FISB", "CLASSIFICA", "FEDERATION", "STANDINGS"];

lazy_static! {
    // 英字・空白・アポストロフィ・ピリオドのみ
    static ref NAME_LIKE_RE: Regex = Regex::new(r"^[A-Za-z\s'.]+$").unwrap();
    static ref PLACEHOLDER_NAME_RE: Regex =
        Regex::new(r"(?i)\b(?:GIOCATORE|TEAM|SQUADRA|ATLETA|NOMINATIVO|PLAYER)\b").unwrap();
}

/// 順位の引き継ぎ状態（空欄の順位は直前の順位を使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankCarry {
    pub last_rank: i64,
}

impl Default for RankCarry {
    fn default() -> Self {
        Self { last_rank: 1 }
    }
}

/// スキップ理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 列推定で見出し行として採用した行
    HeaderRow,
    TooFewCells,
    HeaderRepeat,
    Title,
    NoName,
    PlaceholderName,
}

/// 1行の解釈結果
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Data(RawResult),
    /// 部門バナー行（部門名）
    Section(String),
    Skipped(SkipReason),
}

/// 行の並びを順に解釈する（順位の引き継ぎと部門は内部で保持）
pub struct RowInterpreter<'a> {
    map: &'a ColumnMap,
    options: &'a ParseOptions,
    carry: RankCarry,
    sections: SectionTracker,
    /// 次に解釈する行の位置
    row_index: usize,
}

impl<'a> RowInterpreter<'a> {
    pub fn new(map: &'a ColumnMap, options: &'a ParseOptions) -> Self {
        Self {
            map,
            options,
            carry: RankCarry::default(),
            sections: SectionTracker::new(options),
            row_index: 0,
        }
    }

    /// 抽出順に1行ずつ渡す（見出し行の位置は抽出順で数える）
    pub fn interpret(&mut self, row: &RawRow) -> RowOutcome {
        let row_index = self.row_index;
        self.row_index += 1;

        if self.map.header_row == Some(row_index) {
            return RowOutcome::Skipped(SkipReason::HeaderRow);
        }
        if row.is_empty() {
            return RowOutcome::Skipped(SkipReason::TooFewCells);
        }
        if self.sections.observe(row) {
            let label = self.sections.current().unwrap_or_default().to_string();
            return RowOutcome::Section(label);
        }
        let section = self.sections.current().map(str::to_string);
        match interpret_row(row, self.map, &mut self.carry, section, self.options) {
            Ok(result) => RowOutcome::Data(result),
            Err(reason) => RowOutcome::Skipped(reason),
        }
    }
}

/// 1データ行を解釈する
///
/// 順位が読めた場合は `carry` を更新し、読めない場合は `carry` の順位を使う。
/// 部門バナーの判定は呼び出し側（`RowInterpreter`）で行う。
pub fn interpret_row(
    row: &RawRow,
    map: &ColumnMap,
    carry: &mut RankCarry,
    section: Option<String>,
    options: &ParseOptions,
) -> Result<RawResult, SkipReason> {
    if row.len() < 2 {
        return Err(SkipReason::TooFewCells);
    }

    let joined = row.join(" ").to_uppercase();
    if HEADER_REPEAT_MARKERS.iter().any(|m| joined.contains(m)) {
        return Err(SkipReason::HeaderRepeat);
    }
    if TITLE_MARKERS.iter().any(|m| joined.contains(m)) {
        return Err(SkipReason::Title);
    }

    // 順位（氏名チェックより先に引き継ぎ状態を更新する）
    let rank = match map.rank.and_then(|idx| cell(row, idx)).and_then(leading_int) {
        Some(rank) => {
            carry.last_rank = rank;
            rank
        }
        None => carry.last_rank,
    };

    let name = extract_name(row, map).ok_or(SkipReason::NoName)?;
    if PLACEHOLDER_NAME_RE.is_match(name) {
        return Err(SkipReason::PlaceholderName);
    }

    let per_game_scores = extract_game_scores(row, map, options);
    let game_sum: i64 = per_game_scores.iter().sum();

    // 印字された合計がゲーム合計より小さい場合は転記ミスとしてゲーム合計を採用
    let printed_total = map
        .total
        .and_then(|idx| cell(row, idx))
        .and_then(leading_int)
        .unwrap_or(0);
    let total_score = printed_total.max(game_sum);

    let printed_average = map
        .average
        .and_then(|idx| cell(row, idx))
        .and_then(parse_decimal)
        .filter(|avg| *avg != 0.0 && avg.is_finite());
    let average = match printed_average {
        Some(avg) => avg,
        None if !per_game_scores.is_empty() => total_score as f64 / per_game_scores.len() as f64,
        None => 0.0,
    };

    let team_total = extract_team_total(row, map, game_sum, options);

    Ok(RawResult {
        rank,
        extracted_name: name.to_uppercase(),
        total_score,
        average,
        per_game_scores,
        team_total,
        section,
    })
}

fn cell(row: &RawRow, idx: usize) -> Option<&str> {
    row.get(idx).map(String::as_str)
}

/// 氏名列が使えなければ、行全体から氏名らしいセルを探す
fn extract_name<'r>(row: &'r RawRow, map: &ColumnMap) -> Option<&'r str> {
    let candidate = cell(row, map.name).filter(|name| is_usable_name(name));
    candidate.or_else(|| {
        row.iter()
            .map(String::as_str)
            .find(|c| {
                c.chars().count() > 5
                    && NAME_LIKE_RE.is_match(c)
                    && !looks_numeric(c)
                    && !is_header_token(c)
            })
    })
}

fn is_usable_name(name: &str) -> bool {
    name.chars().count() >= 3
        && !looks_numeric(name)
        && !name.chars().all(|c| c.is_ascii_digit())
        && !is_header_token(name)
}

/// ゲーム別スコア（範囲外は除外）。スコア列が無い・読めない場合は行全体から拾う
fn extract_game_scores(row: &RawRow, map: &ColumnMap, options: &ParseOptions) -> Vec<i64> {
    let from_columns: Vec<i64> = map
        .game_scores
        .iter()
        .filter_map(|&idx| cell(row, idx))
        .filter_map(leading_int)
        .filter(|&v| options.is_game_score(v))
        .collect();
    if !from_columns.is_empty() {
        return from_columns;
    }

    row.iter()
        .filter(|c| !has_decimal_separator(c))
        .filter_map(|c| leading_int(c))
        .filter(|&v| options.is_game_score(v))
        .collect()
}

/// チーム合計
///
/// 列があればその数字。無ければ行内の整数のうち、ゲーム合計と下限を超える最大値を
/// ゲーム合計の `team_total_ratio` 倍以上の場合に限り採用する。
/// 倍率と下限は経験的な調整値。
fn extract_team_total(
    row: &RawRow,
    map: &ColumnMap,
    game_sum: i64,
    options: &ParseOptions,
) -> i64 {
    if let Some(text) = map.team_total.and_then(|idx| cell(row, idx)) {
        if !text.is_empty() {
            return digits_only(text).unwrap_or(0);
        }
    }

    let candidate = row
        .iter()
        .filter_map(|c| integer_token(c))
        .filter(|&n| n > game_sum && n > options.team_total_floor)
        .max();

    match candidate {
        Some(n) if n as f64 >= game_sum as f64 * options.team_total_ratio => n,
        _ => 0,
    }
}
