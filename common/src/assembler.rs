//! 最終レコードの組み立て
//!
//! 照合できた結果だけを大会IDに紐付けて `FinalRecord` にする。

use crate::types::{FinalRecord, MatchedResult, RecordId};

/// 照合済み結果から最終レコードを作る
///
/// ゲーム数はスコアが取れていればその件数、取れていなければ `default_game_count`。
/// 一致が1件も無い場合は空のVecを返す（エラーではない）。
pub fn assemble(
    results: &[MatchedResult],
    tournament_id: &RecordId,
    default_game_count: u32,
) -> Vec<FinalRecord> {
    results
        .iter()
        .filter(|r| r.is_matched)
        .filter_map(|r| {
            let competitor_id = r.competitor_id.clone()?;
            let game_count = if r.raw.per_game_scores.is_empty() {
                default_game_count
            } else {
                r.raw.per_game_scores.len() as u32
            };
            Some(FinalRecord {
                competitor_id,
                tournament_id: tournament_id.clone(),
                rank: r.raw.rank,
                score: r.raw.total_score,
                average: r.raw.average,
                team_total: r.raw.team_total,
                section: r.raw.section.clone(),
                per_game_scores: r.raw.per_game_scores.clone(),
                game_count,
            })
        })
        .collect()
}
