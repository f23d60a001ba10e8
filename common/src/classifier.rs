//! 列の役割推定
//!
//! 先頭の行（最大 `header_scan_rows` 行）から見出しセルを探し、
//! 順位・氏名・ゲーム別スコア・合計・平均・チーム合計の列位置を決める。
//! 見出しが見つからない場合は内容から推定する。
//!
//! 見出しの判定は `LABEL_RULES` を上から順に評価し、最初に一致した規則を採用する。

use crate::normalizer::numbers::looks_numeric;
use crate::options::ParseOptions;
use crate::types::RawRow;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// 列の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Rank,
    Name,
    TeamTotal,
    Total,
    Average,
    /// ゲーム別スコア（複数列）
    GameScore,
}

/// 見出しの判定方法
#[derive(Debug)]
pub enum LabelMatcher {
    OneOf(&'static [&'static str]),
    Pattern(Regex),
}

impl LabelMatcher {
    pub fn is_match(&self, label: &str) -> bool {
        match self {
            LabelMatcher::OneOf(labels) => labels.contains(&label),
            LabelMatcher::Pattern(re) => re.is_match(label),
        }
    }
}

/// 見出し規則（役割と判定方法の組）
#[derive(Debug)]
pub struct LabelRule {
    pub role: ColumnRole,
    pub matcher: LabelMatcher,
}

pub const RANK_LABELS: &[&str] = &[
    "POS", "POS.", "RANGO", "#", "POSIZIONE", "POSIZ.", "CL", "RANK", "POSITION",
];

pub const NAME_LABELS: &[&str] = &[
    "ATLETA", "GIOCATORE", "GIOCATORI", "NOME", "NOMINATIVO", "ATLETA/SOCIETA", "ATHLETE",
    "PLAYER", "NAME",
];

pub const TEAM_TOTAL_LABELS: &[&str] = &[
    "TOT. SQ.", "SQUADRA", "TOT. SQUADRA", "TEAM TOT.", "TOT. TEAM", "TOT. SQUADRE", "TEAM TOTAL",
];

pub const TOTAL_LABELS: &[&str] = &[
    "TOT", "TOTALE", "BIRILLI", "BIRILLO", "TOT. GEN.", "TOTAL", "SCRATCH", "GRAND TOTAL",
];

/// 総合計を表す語（これを含む見出しは一般的な「合計」より優先）
pub const GRAND_TOTAL_MARKERS: &[&str] = &["TOTALE", "GRAND"];

pub const AVERAGE_LABELS: &[&str] = &["MEDIA", "MED", "AVG", "MEDIA PUNTI", "MED. PUNTI", "AVERAGE"];

lazy_static! {
    /// 評価順の見出し規則表
    pub static ref LABEL_RULES: Vec<LabelRule> = vec![
        LabelRule { role: ColumnRole::Rank, matcher: LabelMatcher::OneOf(RANK_LABELS) },
        LabelRule { role: ColumnRole::Name, matcher: LabelMatcher::OneOf(NAME_LABELS) },
        LabelRule { role: ColumnRole::TeamTotal, matcher: LabelMatcher::OneOf(TEAM_TOTAL_LABELS) },
        LabelRule { role: ColumnRole::Total, matcher: LabelMatcher::OneOf(TOTAL_LABELS) },
        LabelRule { role: ColumnRole::Average, matcher: LabelMatcher::OneOf(AVERAGE_LABELS) },
        LabelRule {
            role: ColumnRole::GameScore,
            matcher: LabelMatcher::Pattern(Regex::new(r"^[GP]\d+$").unwrap()),
        },
    ];
}

/// 見出しセルの役割を判定（大文字化・トリムして比較）
pub fn role_for_label(cell: &str) -> Option<ColumnRole> {
    let label = cell.trim().to_uppercase();
    LABEL_RULES
        .iter()
        .find(|rule| rule.matcher.is_match(&label))
        .map(|rule| rule.role)
}

/// 総合計の見出しか（大文字化済みのラベル）
pub fn is_grand_total_label(label: &str) -> bool {
    GRAND_TOTAL_MARKERS.iter().any(|m| label.contains(m))
}

/// 氏名列として扱わない見出し語か
pub fn is_header_token(cell: &str) -> bool {
    role_for_label(cell).is_some()
}

/// 役割 → 列位置の対応表
///
/// 1つの列に単一値の役割は最大1つ。ゲーム別スコア列の集合とは独立。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// None の場合、順位は前行からの引き継ぎのみ
    pub rank: Option<usize>,
    pub name: usize,
    pub total: Option<usize>,
    pub average: Option<usize>,
    pub team_total: Option<usize>,
    pub game_scores: Vec<usize>,
    /// 見出し行として採用した行（見出しが無ければ None）
    pub header_row: Option<usize>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            rank: Some(0),
            name: 1,
            total: None,
            average: None,
            team_total: None,
            game_scores: Vec::new(),
            header_row: None,
        }
    }
}

/// 見出し探索中の途中状態
#[derive(Default)]
struct Assignments {
    rank: Option<usize>,
    name: Option<usize>,
    total: Option<usize>,
    average: Option<usize>,
    team_total: Option<usize>,
    game_scores: Vec<usize>,
}

impl Assignments {
    fn slot(&mut self, role: ColumnRole) -> Option<&mut Option<usize>> {
        match role {
            ColumnRole::Rank => Some(&mut self.rank),
            ColumnRole::Name => Some(&mut self.name),
            ColumnRole::TeamTotal => Some(&mut self.team_total),
            ColumnRole::Total => Some(&mut self.total),
            ColumnRole::Average => Some(&mut self.average),
            ColumnRole::GameScore => None,
        }
    }

    /// 単一値の役割を割り当てる。同じ列が他の役割を持っていれば解除する
    fn assign(&mut self, role: ColumnRole, idx: usize) {
        for slot in [
            &mut self.rank,
            &mut self.name,
            &mut self.total,
            &mut self.average,
            &mut self.team_total,
        ] {
            if *slot == Some(idx) {
                *slot = None;
            }
        }
        if let Some(slot) = self.slot(role) {
            *slot = Some(idx);
        }
    }

    fn add_game_score(&mut self, idx: usize) {
        if !self.game_scores.contains(&idx) {
            self.game_scores.push(idx);
        }
    }
}

/// 行の並びから列の役割を推定する
pub fn classify(rows: &[RawRow], options: &ParseOptions) -> ColumnMap {
    let mut found = Assignments::default();
    let mut header_row = None;

    for (row_idx, row) in rows.iter().take(options.header_scan_rows).enumerate() {
        let mut name_in_row = false;

        for (idx, cell) in row.iter().enumerate() {
            let label = cell.trim().to_uppercase();
            match role_for_label(&label) {
                Some(ColumnRole::Name) => {
                    found.assign(ColumnRole::Name, idx);
                    name_in_row = true;
                }
                Some(ColumnRole::Total) => {
                    if found.total.is_none() || is_grand_total_label(&label) {
                        found.assign(ColumnRole::Total, idx);
                    }
                }
                Some(ColumnRole::GameScore) => found.add_game_score(idx),
                Some(role) => found.assign(role, idx),
                None => {}
            }
        }

        if name_in_row && found.rank.is_some() {
            header_row = Some(row_idx);
            break;
        }
    }

    let name = found
        .name
        .unwrap_or_else(|| infer_name_column(rows, options.name_probe_rows));
    // 氏名列と重なる順位列は採用しない
    let rank = match found.rank {
        Some(idx) if idx != name => Some(idx),
        Some(_) => None,
        None if name == 0 => None,
        None => Some(0),
    };

    let map = ColumnMap {
        rank,
        name,
        total: found.total,
        average: found.average,
        team_total: found.team_total,
        game_scores: found.game_scores,
        header_row,
    };
    debug!("column map: {:?}", map);
    map
}

/// 先頭数行で「5文字超の非数値文字列」を含む最初の列を氏名列とみなす（無ければ1）
fn infer_name_column(rows: &[RawRow], probe_rows: usize) -> usize {
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    let probe = &rows[..rows.len().min(probe_rows)];

    (0..width)
        .find(|&col| {
            probe.iter().any(|row| {
                row.get(col)
                    .map(|cell| cell.chars().count() > 5 && !looks_numeric(cell))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(1)
}
