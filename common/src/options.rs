//! 解析パラメータ
//!
//! 列推定・得点範囲・チーム合計判定のしきい値。
//! 既定値はFISBの成績表に合わせて調整した値で、設定ファイルから上書きできる。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 解析オプション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// ヘッダー探索の最大行数
    pub header_scan_rows: usize,
    /// 氏名列の推定に使う先頭行数
    pub name_probe_rows: usize,
    /// 1ゲームの最小スコア
    pub min_game_score: i64,
    /// 1ゲームの最大スコア
    pub max_game_score: i64,
    /// チーム合計候補の下限（これより大きい値のみ）
    pub team_total_floor: i64,
    /// チーム合計候補はゲーム合計のこの倍率以上
    pub team_total_ratio: f64,
    /// 部分一致照合に必要な最小文字数
    pub min_match_length: usize,
    /// 追加の部門キーワード
    pub extra_section_keywords: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header_scan_rows: 20,
            name_probe_rows: 5,
            min_game_score: 50,
            max_game_score: 300,
            team_total_floor: 200,
            team_total_ratio: 1.3,
            min_match_length: 6,
            extra_section_keywords: Vec::new(),
        }
    }
}

impl ParseOptions {
    /// JSON文字列から読み込み（欠けた項目は既定値）
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.header_scan_rows == 0 {
            return Err(Error::Config("headerScanRows must be at least 1".into()));
        }
        if self.min_game_score > self.max_game_score {
            return Err(Error::Config(format!(
                "minGameScore ({}) is greater than maxGameScore ({})",
                self.min_game_score, self.max_game_score
            )));
        }
        if self.team_total_ratio.is_nan() || self.team_total_ratio < 1.0 {
            return Err(Error::Config(format!(
                "teamTotalRatio must be >= 1.0 (got {})",
                self.team_total_ratio
            )));
        }
        Ok(())
    }

    /// 1ゲームのスコアとして妥当か
    pub fn is_game_score(&self, value: i64) -> bool {
        (self.min_game_score..=self.max_game_score).contains(&value)
    }
}
