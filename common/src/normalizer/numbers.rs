//! セル内の数値の読み取り
//!
//! 成績表の数値セルには「185*」「12°」「181,50」のような
//! 装飾や小数区切りの揺れが混ざるため、先頭の数値部分だけを読む。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_INT_RE: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
    static ref LEADING_DECIMAL_RE: Regex =
        Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))").unwrap();
    // 整数（桁区切り付きも可）。小数は含まない
    static ref INTEGER_TOKEN_RE: Regex =
        Regex::new(r"^(?:\d{1,3}(?:[.' ]\d{3})+|\d+)$").unwrap();
}

/// 先頭の整数部分を読む（"185*" → 185, "1.5" → 1）
pub fn leading_int(text: &str) -> Option<i64> {
    LEADING_INT_RE
        .captures(text)
        .and_then(|cap| cap[1].parse::<i64>().ok())
}

/// 先頭の小数部分を読む（"181.5 pt" → 181.5）。カンマは区切りとみなさない
pub fn leading_decimal(text: &str) -> Option<f64> {
    LEADING_DECIMAL_RE
        .captures(text)
        .and_then(|cap| cap[1].parse::<f64>().ok())
}

/// 小数を読む（カンマ区切りも可: "181,50" → 181.5）
pub fn parse_decimal(text: &str) -> Option<f64> {
    leading_decimal(&text.replacen(',', ".", 1))
}

/// 数値として読める文字列か
pub fn looks_numeric(text: &str) -> bool {
    leading_decimal(text).is_some()
}

/// 数字だけを取り出して読む（"1.234 pt" → 1234）
pub fn digits_only(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}

/// セル全体が整数（桁区切り可）の場合のみ値を返す
pub fn integer_token(text: &str) -> Option<i64> {
    if INTEGER_TOKEN_RE.is_match(text.trim()) {
        digits_only(text)
    } else {
        None
    }
}

/// 小数区切り（. または ,）を含むか
pub fn has_decimal_separator(text: &str) -> bool {
    text.contains('.') || text.contains(',')
}
