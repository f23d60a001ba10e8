//! 取り込みパイプラインの型定義
//!
//! パイプラインの各段が受け渡す型:
//! - RawRow: 行抽出の出力（セル文字列の並び）
//! - RawResult: 行解釈の出力（1データ行 = 1件）
//! - MatchedResult: 選手照合の出力
//! - FinalRecord: 永続化先へ渡す最終レコード
//!
//! CompetitorRef / TournamentRef は外部（選手登録・大会カタログ）の所有物で、
//! パイプラインからは読み取り専用。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 抽出された1行（正規化済みセルの並び、列数は行ごとに異なる）
pub type RawRow = Vec<String>;

/// 部門・カテゴリ名（バナー行が無ければ None）
pub type Section = Option<String>;

/// 外部システムのID（数値・文字列どちらも受け付ける）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::convert::Infallible;

    /// 数値として読めるものは Number、それ以外は Text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        })
    }
}

/// 登録選手（照合対象）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorRef {
    pub id: RecordId,
    #[serde(alias = "nome")]
    pub given_name: String,
    #[serde(alias = "cognome")]
    pub family_name: String,
}

impl CompetitorRef {
    pub fn new(id: impl Into<RecordId>, given_name: &str, family_name: &str) -> Self {
        Self {
            id: id.into(),
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
        }
    }

    /// 表示用の氏名（名 姓）
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// 大会カタログの1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRef {
    pub id: RecordId,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "numero_partite")]
    pub game_count: Option<u32>,
}

/// 大会カタログ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentCatalog {
    pub tournaments: Vec<TournamentRef>,
}

/// カタログにゲーム数が無い場合の既定値
pub const DEFAULT_GAME_COUNT: u32 = 6;

impl TournamentCatalog {
    pub fn new(tournaments: Vec<TournamentRef>) -> Self {
        Self { tournaments }
    }

    pub fn find(&self, id: &RecordId) -> Option<&TournamentRef> {
        self.tournaments.iter().find(|t| &t.id == id)
    }

    /// 大会の既定ゲーム数（不明なら DEFAULT_GAME_COUNT）
    pub fn game_count_for(&self, id: &RecordId) -> u32 {
        self.find(id)
            .and_then(|t| t.game_count)
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_GAME_COUNT)
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }
}

/// 行解釈の結果（1データ行につき1件、生成後は不変）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    pub rank: i64,
    /// 大文字化済みの抽出氏名
    pub extracted_name: String,
    pub total_score: i64,
    pub average: f64,
    pub per_game_scores: Vec<i64>,
    pub team_total: i64,
    #[serde(default)]
    pub section: Section,
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedResult {
    #[serde(flatten)]
    pub raw: RawResult,
    pub competitor_id: Option<RecordId>,
    /// 一致時は登録上の氏名、不一致時は抽出氏名
    pub resolved_name: String,
    pub is_matched: bool,
}

/// 永続化先へ渡す最終レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalRecord {
    pub competitor_id: RecordId,
    pub tournament_id: RecordId,
    pub rank: i64,
    pub score: i64,
    pub average: f64,
    pub team_total: i64,
    pub section: Section,
    pub per_game_scores: Vec<i64>,
    pub game_count: u32,
}
