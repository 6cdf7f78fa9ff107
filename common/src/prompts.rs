//! プロンプト生成モジュール
//!
//! - build_keyword_prompt: 音声メモからのキーワード抽出用
//! - build_amenity_prompt: 写真からの設備検出用

use crate::labels::{MAX_LABELS, MIN_LABELS};
use std::path::Path;

/// キーワード抽出プロンプト生成
///
/// # Arguments
/// * `transcript` - インスペクション中の音声メモ（文字起こし済み）
pub fn build_keyword_prompt(transcript: &str) -> String {
    format!(
        r#"You are assisting a property inspector. Extract the key property features and condition notes from the inspection note below.

## Inspection note
{transcript}

## Output rules
- Return between {MIN_LABELS} and {MAX_LABELS} short keywords (1-3 words each, lower case)
- Output ONLY a JSON array of strings, for example: ["natural lighting", "spacious"]"#
    )
}

/// 設備検出プロンプト生成
///
/// # Arguments
/// * `image_path` - 解析対象の画像ファイル
pub fn build_amenity_prompt(image_path: &Path) -> String {
    let path = image_path.display().to_string().replace('\\', "/");
    format!(
        r#"Read the following image file and analyze it: {path}

You are assisting a property inspector. List the amenities and interior features visible in the photo.

## Output rules
- Return between {MIN_LABELS} and {MAX_LABELS} short labels in Title Case, for example "Kitchen Island"
- Output ONLY a JSON array of strings"#
    )
}
