//! 解析サービスクライアント
//!
//! テキスト解析（音声メモ→キーワード）と画像解析（写真→設備）の2操作。
//! どちらも非同期・失敗しうる・3〜9個の短いラベルを返す、という契約のみを持つ。

mod ai_cli;
mod mock;

pub use ai_cli::{parse_labels, CliAnalysisService};
pub use mock::MockAnalysisService;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use property_inspect_common::ImageRef;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// 解析呼び出しの失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("CLI実行エラー: {0}")]
    Command(String),

    #[error("解析がタイムアウトしました ({0}秒)")]
    Timeout(u64),

    #[error("レスポンスのパースに失敗: {0}")]
    Parse(String),

    #[error("ラベル数が契約外: {0}")]
    Contract(String),

    #[error("解析サービスを利用できません: {0}")]
    Unavailable(String),
}

/// 解析1回分の結果
pub type LabelResult = std::result::Result<Vec<String>, AnalysisError>;

/// 解析サービス
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// 音声メモからキーワードを抽出
    async fn analyze_text(&self, text: &str) -> LabelResult;

    /// 写真から設備を検出
    async fn analyze_image(&self, image: &ImageRef) -> LabelResult;
}

/// 設定に応じた解析サービスを構築
pub fn build_service(provider: AiProvider, config: &Config) -> Result<Arc<dyn AnalysisService>> {
    let service: Arc<dyn AnalysisService> = match provider {
        AiProvider::Mock => Arc::new(MockAnalysisService::new().with_delays(
            Duration::from_millis(config.text_delay_ms),
            Duration::from_millis(config.image_delay_ms),
        )),
        _ => Arc::new(CliAnalysisService::new(provider, config.timeout())?),
    };
    Ok(service)
}
