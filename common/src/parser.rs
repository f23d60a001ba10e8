//! 成績表パーサー
//!
//! 貼り付けられた成績表（HTMLまたはテキスト）を解析し、登録選手と照合する。
//!
//! 処理順:
//! 1. 行抽出（`extractor`）
//! 2. 列の役割推定（`classifier`）
//! 3. 行解釈と部門追跡（`interpreter` / `section`）
//! 4. 選手照合（`matcher`）
//!
//! 呼び出しごとに独立しており、同じ入力からは常に同じ結果が得られる。

use crate::classifier::{classify, ColumnMap};
use crate::error::{Error, Result};
use crate::extractor::{extract, ExtractionPath};
use crate::interpreter::{RowInterpreter, RowOutcome};
use crate::matcher::NameMatcher;
use crate::options::ParseOptions;
use crate::types::{CompetitorRef, MatchedResult};
use log::{debug, info, warn};

/// 解析結果と集計
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    /// データ行ごとの照合結果（不一致も含む）
    pub results: Vec<MatchedResult>,
    pub path: ExtractionPath,
    /// 抽出した行数
    pub rows_extracted: usize,
    /// スキップした行数（部門バナー行は含まない）
    pub rows_skipped: usize,
    pub sections: usize,
    pub column_map: ColumnMap,
}

impl ParseReport {
    pub fn matched_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_matched).count()
    }

    pub fn unmatched_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.is_matched)
            .map(|r| r.raw.extracted_name.as_str())
            .collect()
    }

    /// 一致が1件も無ければ `Error::NoMatches`
    pub fn ensure_matches(&self) -> Result<()> {
        if self.matched_count() == 0 {
            return Err(Error::NoMatches {
                extracted: self.results.len(),
            });
        }
        Ok(())
    }
}

/// 既定オプションで解析する
///
/// # Returns
/// * `Ok(ParseReport)` - 1行以上抽出できた（一致0件でも Ok）
/// * `Err(Error::EmptyInput)` - どの経路でも行を抽出できなかった
///
/// # Examples
/// ```
/// use bowling_import_common::{parse, CompetitorRef};
///
/// let html = "<tr><td>1</td><td></td><td>SMITH JOHN</td><td></td><td>185</td></tr>";
/// let registry = vec![CompetitorRef::new(7, "John", "Smith")];
/// let report = parse(html, &registry).unwrap();
/// assert_eq!(report.results[0].raw.total_score, 185);
/// assert!(report.results[0].is_matched);
/// ```
pub fn parse(content: &str, registry: &[CompetitorRef]) -> Result<ParseReport> {
    parse_with_options(content, registry, &ParseOptions::default())
}

/// オプションを指定して解析する
pub fn parse_with_options(
    content: &str,
    registry: &[CompetitorRef],
    options: &ParseOptions,
) -> Result<ParseReport> {
    options.validate()?;

    let extraction = extract(content);
    if extraction.rows.is_empty() {
        warn!("no rows extracted from {} bytes of content", content.len());
        return Err(Error::EmptyInput);
    }

    let column_map = classify(&extraction.rows, options);
    let matcher = NameMatcher::new(registry, options);
    let mut interpreter = RowInterpreter::new(&column_map, options);

    let mut results = Vec::new();
    let mut rows_skipped = 0;
    let mut sections = 0;

    for (idx, row) in extraction.rows.iter().enumerate() {
        match interpreter.interpret(row) {
            RowOutcome::Data(raw) => results.push(matcher.resolve(raw)),
            RowOutcome::Section(_) => sections += 1,
            RowOutcome::Skipped(reason) => {
                debug!("row {} skipped: {:?}", idx, reason);
                rows_skipped += 1;
            }
        }
    }

    let report = ParseReport {
        results,
        path: extraction.path,
        rows_extracted: extraction.rows.len(),
        rows_skipped,
        sections,
        column_map,
    };
    info!(
        "parsed {} rows: {} results, {} matched",
        report.rows_extracted,
        report.results.len(),
        report.matched_count()
    );
    Ok(report)
}
