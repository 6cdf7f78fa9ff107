//! APIレスポンスパーサー
//!
//! AI CLIのレスポンスからJSONを抽出し、ラベル配列としてパースする

use crate::error::{Error, Result};

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
///
/// # Examples
/// ```
/// use property_inspect_common::extract_json;
///
/// let response = "Sure:\n[\"spacious\", \"hardwood floors\"]";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('['));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の [...] を探す
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// ラベル配列レスポンスをパース
///
/// `["natural lighting", "spacious", ...]` 形式の文字列配列のみ受け付ける。
/// 件数の検証は呼び出し側で行う。
pub fn parse_label_response(response: &str) -> Result<Vec<String>> {
    let json_str = extract_json(response)?;
    let labels: Vec<String> = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("ラベルJSONパースエラー: {}", e)))?;
    Ok(labels)
}
