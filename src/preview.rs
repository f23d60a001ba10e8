//! 解析結果のプレビュー表示

use bowling_import_common::{MatchedResult, ParseReport};

/// プレビューの1行
pub fn preview_line(result: &MatchedResult) -> String {
    let status = if result.is_matched {
        format!("✓ {}", result.resolved_name)
    } else {
        "✗ 未登録".to_string()
    };
    let section = result
        .raw
        .section
        .as_deref()
        .map(|s| format!("  [{}]", s))
        .unwrap_or_default();
    format!(
        "{:>4}  {:<28} {:<24} {:>6} pins{}",
        result.raw.rank, result.raw.extracted_name, status, result.raw.total_score, section
    )
}

/// プレビュー全体（`matches_only` なら一致した行のみ）
pub fn render_preview(report: &ParseReport, matches_only: bool) -> Vec<String> {
    report
        .results
        .iter()
        .filter(|r| !matches_only || r.is_matched)
        .map(preview_line)
        .collect()
}

/// 集計行
pub fn summary_line(report: &ParseReport) -> String {
    format!(
        "行数 {} / 結果 {} / 一致 {} / スキップ {}",
        report.rows_extracted,
        report.results.len(),
        report.matched_count(),
        report.rows_skipped
    )
}
