//! 選手照合
//!
//! 抽出氏名を登録選手と照合する。氏名は `fold_name` で正規化し、
//! 「名+姓」「姓+名」の両方の連結と比べるので語順に依存しない。
//!
//! 一致規則（登録順に評価し、最初に一致した選手を採用）:
//! 1. 正規化氏名がどちらかの連結と完全一致
//! 2. 正規化氏名が名・姓の両方を部分文字列として含む
//! 3. どちらかの連結が正規化氏名を含み、かつ正規化氏名が `min_match_length` 文字以上

use crate::normalizer::fold_name;
use crate::options::ParseOptions;
use crate::types::{CompetitorRef, MatchedResult, RawResult};

/// 照合用に正規化した登録選手の氏名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKey {
    pub given: String,
    pub family: String,
    /// 名+姓
    pub forward: String,
    /// 姓+名
    pub reverse: String,
}

impl NameKey {
    pub fn new(competitor: &CompetitorRef) -> Self {
        let given = fold_name(&competitor.given_name);
        let family = fold_name(&competitor.family_name);
        let forward = format!("{}{}", given, family);
        let reverse = format!("{}{}", family, given);
        Self {
            given,
            family,
            forward,
            reverse,
        }
    }

    /// 正規化済みの抽出氏名と一致するか
    pub fn matches(&self, target: &str, min_match_length: usize) -> bool {
        if target.is_empty() {
            return false;
        }
        if target == self.forward || target == self.reverse {
            return true;
        }
        if !self.given.is_empty()
            && !self.family.is_empty()
            && target.contains(&self.given)
            && target.contains(&self.family)
        {
            return true;
        }
        target.len() >= min_match_length
            && (self.forward.contains(target) || self.reverse.contains(target))
    }
}

/// 登録選手一覧に対する照合器
pub struct NameMatcher<'a> {
    entries: Vec<(&'a CompetitorRef, NameKey)>,
    min_match_length: usize,
}

impl<'a> NameMatcher<'a> {
    pub fn new(registry: &'a [CompetitorRef], options: &ParseOptions) -> Self {
        Self {
            entries: registry.iter().map(|c| (c, NameKey::new(c))).collect(),
            min_match_length: options.min_match_length,
        }
    }

    /// 抽出氏名に一致する最初の登録選手
    pub fn find(&self, extracted_name: &str) -> Option<&'a CompetitorRef> {
        let target = fold_name(extracted_name);
        self.entries
            .iter()
            .find(|(_, key)| key.matches(&target, self.min_match_length))
            .map(|(competitor, _)| *competitor)
    }

    /// 照合結果を作る（不一致でもレコードは残す）
    pub fn resolve(&self, raw: RawResult) -> MatchedResult {
        match self.find(&raw.extracted_name) {
            Some(competitor) => MatchedResult {
                competitor_id: Some(competitor.id.clone()),
                resolved_name: competitor.display_name(),
                is_matched: true,
                raw,
            },
            None => MatchedResult {
                competitor_id: None,
                resolved_name: raw.extracted_name.clone(),
                is_matched: false,
                raw,
            },
        }
    }
}

/// 1件を照合する（既定オプション）
pub fn match_result(raw: RawResult, registry: &[CompetitorRef]) -> MatchedResult {
    NameMatcher::new(registry, &ParseOptions::default()).resolve(raw)
}
