//! 物件・インスペクションの型定義
//!
//! CLIと解析サービスで共有される型:
//! - Property: 物件カタログの1件
//! - User: ログイン中の担当者
//! - InspectionSession: 1回の物件インスペクションの一時状態
//! - InspectionReport: 完了時に出力されるスナップショット

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 物件の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    Available,
    Pending,
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyStatus::Available => write!(f, "Available"),
            PropertyStatus::Pending => write!(f, "Pending"),
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(PropertyStatus::Available),
            "pending" => Ok(PropertyStatus::Pending),
            other => Err(crate::error::Error::Parse(format!(
                "unknown property status: {}",
                other
            ))),
        }
    }
}

/// 物件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price: u64,
    pub status: PropertyStatus,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub inspection_date: String,
    /// 物件サムネイルのURL
    #[serde(default)]
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f32,
}

fn default_role() -> String {
    "Property Inspector".to_string()
}

/// ログイン中の担当者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub uid: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            uid: uid.into(),
            role: default_role(),
            profile_picture: None,
        }
    }
}

/// 録音のサブ状態
///
/// `Idle -> Recording -> Transcribing -> Idle` の順にのみ遷移する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Transcribing,
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingState::Idle => write!(f, "idle"),
            RecordingState::Recording => write!(f, "recording"),
            RecordingState::Transcribing => write!(f, "transcribing"),
        }
    }
}

/// 画像ピッカーが返す不透明な画像ハンドル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// 内容ダイジェスト由来のID
    pub id: String,
    /// 解析に渡す画像ファイル（縮小済みの場合はその複製）
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// 撮影日時（EXIF DateTimeOriginal）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
}

/// 1回の物件インスペクションの状態
///
/// 画面に入った時点で作られ、画面を離れると破棄される。永続化はしない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionSession {
    pub property_ref: String,
    pub recording_state: RecordingState,
    /// 文字起こし成功後のみ存在
    pub transcript: Option<String>,
    pub extracted_keywords: Vec<String>,
    pub selected_image: Option<ImageRef>,
    pub detected_amenities: Vec<String>,
    /// テキスト解析が未完了
    pub text_in_flight: bool,
    /// 画像解析が未完了
    pub image_in_flight: bool,
}

impl InspectionSession {
    pub fn new(property_ref: impl Into<String>) -> Self {
        Self {
            property_ref: property_ref.into(),
            ..Default::default()
        }
    }

    /// いずれかの解析が未完了か
    pub fn analysis_in_flight(&self) -> bool {
        self.text_in_flight || self.image_in_flight
    }

    /// 文字起こし・キーワード・検出設備のいずれかが得られているか
    pub fn has_results(&self) -> bool {
        self.transcript.is_some()
            || !self.extracted_keywords.is_empty()
            || !self.detected_amenities.is_empty()
    }
}

/// インスペクション完了レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub property_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<User>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// 完了時点でまだ解析中だったか
    #[serde(default)]
    pub analysis_pending: bool,
    /// RFC 3339
    pub completed_at: String,
}

impl InspectionReport {
    pub fn from_session(
        session: &InspectionSession,
        inspector: Option<User>,
        completed_at: impl Into<String>,
    ) -> Self {
        Self {
            property_ref: session.property_ref.clone(),
            inspector,
            transcript: session.transcript.clone(),
            keywords: session.extracted_keywords.clone(),
            image: session.selected_image.clone(),
            amenities: session.detected_amenities.clone(),
            analysis_pending: session.analysis_in_flight(),
            completed_at: completed_at.into(),
        }
    }

    pub fn has_results(&self) -> bool {
        self.transcript.is_some() || !self.keywords.is_empty() || !self.amenities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = InspectionSession::new("1");
        assert_eq!(session.property_ref, "1");
        assert_eq!(session.recording_state, RecordingState::Idle);
        assert!(session.transcript.is_none());
        assert!(session.extracted_keywords.is_empty());
        assert!(session.detected_amenities.is_empty());
        assert!(!session.analysis_in_flight());
        assert!(!session.has_results());
    }

    #[test]
    fn test_analysis_in_flight_is_either_kind() {
        let mut session = InspectionSession::new("1");
        session.image_in_flight = true;
        assert!(session.analysis_in_flight());
        session.image_in_flight = false;
        session.text_in_flight = true;
        assert!(session.analysis_in_flight());
    }

    #[test]
    fn test_property_deserialize_type_field() {
        let json = r#"{
            "id": "9", "name": "Test", "location": "Somewhere", "price": 100,
            "status": "Pending", "type": "Condo", "rating": 4.5
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.kind, "Condo");
        assert_eq!(property.status, PropertyStatus::Pending);
        assert!(property.amenities.is_empty());
    }

    #[test]
    fn test_user_default_role() {
        let json = r#"{"name": "Ann", "email": "ann@example.com", "uid": "u1"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, "Property Inspector");
        assert!(user.profile_picture.is_none());
    }

    #[test]
    fn test_report_from_session() {
        let mut session = InspectionSession::new("3");
        session.transcript = Some("note".to_string());
        session.extracted_keywords = vec!["spacious".to_string()];
        session.image_in_flight = true;

        let report = InspectionReport::from_session(&session, None, "2025-08-17T10:00:00+00:00");
        assert_eq!(report.property_ref, "3");
        assert_eq!(report.keywords, vec!["spacious"]);
        assert!(report.analysis_pending);
        assert!(report.has_results());
    }

    #[test]
    fn test_report_json_camel_case() {
        let session = InspectionSession::new("2");
        let report = InspectionReport::from_session(&session, None, "2025-08-16T09:00:00+00:00");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"propertyRef\":\"2\""));
        assert!(json.contains("\"analysisPending\":false"));
        assert!(!json.contains("inspector"));
    }
}
