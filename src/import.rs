//! 取り込み処理
//!
//! 解析 → 大会への紐付け → 保存先への受け渡し。
//! 大会の選択と保存先は呼び出し側が用意する。

use crate::error::Result;
use crate::sink::ResultSink;
use bowling_import_common::{
    assemble, parse_with_options, CompetitorRef, FinalRecord, ParseOptions, ParseReport,
    TournamentRef,
};

/// 取り込み結果の集計
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// プレビュー表示用の解析結果
    pub report: ParseReport,
    pub rows_extracted: usize,
    pub results: usize,
    pub matched: usize,
    pub persisted: usize,
    pub unmatched_names: Vec<String>,
}

/// 大会のゲーム数（カタログの値、無ければ既定値）
pub fn game_count_for(tournament: &TournamentRef, fallback: u32) -> u32 {
    tournament.game_count.filter(|&n| n > 0).unwrap_or(fallback)
}

/// 解析済み結果を最終レコードにする（一致0件なら `NoMatches`）
pub fn build_records(
    report: &ParseReport,
    tournament: &TournamentRef,
    default_game_count: u32,
) -> Result<Vec<FinalRecord>> {
    report.ensure_matches()?;
    let game_count = game_count_for(tournament, default_game_count);
    Ok(assemble(&report.results, &tournament.id, game_count))
}

/// 貼り付け内容を解析し、一致した選手の結果を保存先へ渡す
pub fn run_import(
    content: &str,
    registry: &[CompetitorRef],
    tournament: &TournamentRef,
    default_game_count: u32,
    options: &ParseOptions,
    sink: &mut dyn ResultSink,
) -> Result<ImportSummary> {
    let report = parse_with_options(content, registry, options)?;
    let records = build_records(&report, tournament, default_game_count)?;
    let persisted = sink.persist(&records)?;

    let unmatched_names = report
        .unmatched_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(ImportSummary {
        rows_extracted: report.rows_extracted,
        results: report.results.len(),
        matched: report.matched_count(),
        persisted,
        unmatched_names,
        report,
    })
}
