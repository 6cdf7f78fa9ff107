//! 解析ラベルの契約とフォールバック
//!
//! テキスト解析・画像解析はどちらも「3〜9個の短いラベル」を返す。
//! 解析に失敗した場合は固定のフォールバックに差し替え、エラーは画面に出さない。

use crate::error::{Error, Result};
use std::collections::HashSet;

/// ラベル数の下限
pub const MIN_LABELS: usize = 3;

/// ラベル数の上限
pub const MAX_LABELS: usize = 9;

/// 音声メモの代替文（実際の音声取り込みは行わない）
pub const PLACEHOLDER_TRANSCRIPT: &str = "The property showcases excellent natural lighting throughout all rooms. Modern kitchen with stainless steel appliances. Living area is spacious with hardwood flooring. Overall condition is very good.";

/// テキスト解析失敗時のキーワード
pub const FALLBACK_KEYWORDS: &[&str] = &[
    "natural lighting",
    "modern appliances",
    "spacious",
    "hardwood floors",
];

/// 画像解析失敗時の検出設備
pub const FALLBACK_AMENITIES: &[&str] = &[
    "Kitchen Island",
    "Modern Appliances",
    "Granite Countertops",
];

/// モック解析のキーワード候補（先頭から切り出して使う）
pub const KEYWORD_CANDIDATES: &[&str] = &[
    "natural lighting",
    "modern appliances",
    "stainless steel",
    "spacious",
    "hardwood floors",
    "walk-in closet",
    "good condition",
    "minor maintenance",
    "updated fixtures",
];

/// モック解析の設備候補
pub const AMENITY_CANDIDATES: &[&str] = &[
    "Kitchen Island",
    "Granite Countertops",
    "Modern Appliances",
    "Pendant Lighting",
    "Tile Backsplash",
    "Stainless Steel Sink",
    "Hardwood Floors",
    "Crown Molding",
    "Recessed Lighting",
];

/// ラベルを整形
///
/// 前後の空白除去、空ラベル除去、大文字小文字を無視した重複除去（先勝ち）、
/// 上限までの切り詰めを行う。
pub fn normalize_labels<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|label| {
            let label = label.as_ref().trim();
            if label.is_empty() || !seen.insert(label.to_lowercase()) {
                None
            } else {
                Some(label.to_string())
            }
        })
        .take(MAX_LABELS)
        .collect()
}

/// ラベルを整形し、下限を満たすか検証
pub fn validate_labels<I, S>(raw: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let labels = normalize_labels(raw);
    if labels.len() < MIN_LABELS {
        return Err(Error::TooFewLabels {
            min: MIN_LABELS,
            actual: labels.len(),
        });
    }
    Ok(labels)
}

/// 解析結果の出所
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// 解析サービスが返したラベル
    Analyzed(Vec<String>),
    /// 失敗時に差し替えたラベル
    Fallback(Vec<String>),
}

impl Resolved {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    pub fn into_labels(self) -> Vec<String> {
        match self {
            Resolved::Analyzed(labels) | Resolved::Fallback(labels) => labels,
        }
    }
}

/// 解析失敗時の差し替えポリシー
///
/// 空の成功結果も失敗として扱う（解析完了後のラベルは常に非空）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub keywords: Vec<String>,
    pub amenities: Vec<String>,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            keywords: FALLBACK_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            amenities: FALLBACK_AMENITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FallbackPolicy {
    pub fn new(keywords: Vec<String>, amenities: Vec<String>) -> Self {
        Self { keywords, amenities }
    }

    pub fn resolve_keywords<E>(&self, result: std::result::Result<Vec<String>, E>) -> Resolved {
        resolve_or(result, &self.keywords)
    }

    pub fn resolve_amenities<E>(&self, result: std::result::Result<Vec<String>, E>) -> Resolved {
        resolve_or(result, &self.amenities)
    }
}

fn resolve_or<E>(result: std::result::Result<Vec<String>, E>, fallback: &[String]) -> Resolved {
    match result {
        Ok(labels) if !labels.is_empty() => Resolved::Analyzed(labels),
        _ => Resolved::Fallback(fallback.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_sizes() {
        assert_eq!(FALLBACK_KEYWORDS.len(), 4);
        assert_eq!(FALLBACK_AMENITIES.len(), 3);
        assert_eq!(KEYWORD_CANDIDATES.len(), MAX_LABELS);
        assert_eq!(AMENITY_CANDIDATES.len(), MAX_LABELS);
    }

    #[test]
    fn test_normalize_trims_and_dedupes() {
        let labels = normalize_labels(["  Spacious ", "", "spacious", "Hardwood Floors", "   "]);
        assert_eq!(labels, vec!["Spacious", "Hardwood Floors"]);
    }

    #[test]
    fn test_normalize_truncates_to_max() {
        let raw: Vec<String> = (0..15).map(|i| format!("label {}", i)).collect();
        let labels = normalize_labels(&raw);
        assert_eq!(labels.len(), MAX_LABELS);
        assert_eq!(labels[0], "label 0");
        assert_eq!(labels[8], "label 8");
    }

    #[test]
    fn test_validate_rejects_too_few() {
        let err = validate_labels(["a", "A", "b"]).unwrap_err();
        assert!(matches!(err, Error::TooFewLabels { min: 3, actual: 2 }));
    }

    #[test]
    fn test_validate_accepts_three() {
        let labels = validate_labels(["a", "b", "c"]).unwrap();
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_resolve_success_keeps_labels() {
        let policy = FallbackPolicy::default();
        let resolved = policy.resolve_keywords::<String>(Ok(vec!["walk-in closet".to_string()]));
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.into_labels(), vec!["walk-in closet"]);
    }

    #[test]
    fn test_resolve_error_uses_fallback() {
        let policy = FallbackPolicy::default();
        let resolved = policy.resolve_amenities(Err("timeout"));
        assert!(resolved.is_fallback());
        assert_eq!(
            resolved.into_labels(),
            vec!["Kitchen Island", "Modern Appliances", "Granite Countertops"]
        );
    }

    #[test]
    fn test_resolve_empty_success_uses_fallback() {
        let policy = FallbackPolicy::default();
        let resolved = policy.resolve_keywords::<String>(Ok(Vec::new()));
        assert!(resolved.is_fallback());
        assert_eq!(resolved.into_labels().len(), 4);
    }

    #[test]
    fn test_custom_policy() {
        let policy = FallbackPolicy::new(vec!["x".to_string()], vec!["y".to_string()]);
        assert_eq!(policy.resolve_keywords(Err(())).into_labels(), vec!["x"]);
        assert_eq!(policy.resolve_amenities(Err(())).into_labels(), vec!["y"]);
    }
}
