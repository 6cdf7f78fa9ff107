//! AI CLI連携モジュール
//!
//! claude / codex / gemini のCLIにプロンプトを渡し、返答からラベルを取り出す。
//! - テキスト解析: 音声メモ → キーワード
//! - 画像解析: 画像ファイルのパスをプロンプトに含めて設備を検出

use super::{AnalysisError, AnalysisService, LabelResult};
use crate::ai_provider::AiProvider;
use crate::error::{InspectError, Result};
use async_trait::async_trait;
use property_inspect_common::{
    build_amenity_prompt, build_keyword_prompt, parse_label_response, validate_labels, ImageRef,
};
use regex::Regex;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

pub struct CliAnalysisService {
    provider: AiProvider,
    command: String,
    timeout: Duration,
}

impl CliAnalysisService {
    pub fn new(provider: AiProvider, timeout: Duration) -> Result<Self> {
        let command = provider.command_name().ok_or_else(|| {
            InspectError::Config(format!("{} はCLIプロバイダではありません", provider))
        })?;
        Ok(Self {
            provider,
            command: command.to_string(),
            timeout,
        })
    }

    async fn run(&self, prompt: &str) -> std::result::Result<String, AnalysisError> {
        // プロンプトは1行にして渡す
        let prompt = prompt.replace('\n', " ");
        #[cfg(windows)]
        let prompt = prompt.replace('"', "\\\"");
        let args = self.provider.prompt_args(&prompt);

        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            c.arg("/c").arg(&self.command).args(&args);
            c
        };

        #[cfg(not(windows))]
        let mut command = {
            let mut c = Command::new(&self.command);
            c.args(&args);
            c
        };

        command.kill_on_drop(true);

        debug!(provider = %self.provider, prompt_len = prompt.len(), "AI CLI呼び出し");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| AnalysisError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| AnalysisError::Command(format!("{} 実行エラー: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalysisError::Command(format!(
                "{} failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(response_len = response.len(), "AI CLI応答");
        Ok(response)
    }
}

#[async_trait]
impl AnalysisService for CliAnalysisService {
    async fn analyze_text(&self, text: &str) -> LabelResult {
        let response = self.run(&build_keyword_prompt(text)).await?;
        parse_labels(&response)
    }

    async fn analyze_image(&self, image: &ImageRef) -> LabelResult {
        let response = self.run(&build_amenity_prompt(&image.path)).await?;
        parse_labels(&response)
    }
}

/// 応答からラベルを取り出して契約（3〜9件）を検証
///
/// JSON配列を優先し、なければ箇条書き行（`- foo` / `1. foo`）を拾う。
pub fn parse_labels(response: &str) -> LabelResult {
    let raw = match parse_label_response(response) {
        Ok(labels) => labels,
        Err(_) => parse_bullet_lines(response),
    };

    if raw.is_empty() {
        return Err(AnalysisError::Parse("ラベルが見つかりません".into()));
    }

    validate_labels(raw).map_err(|e| AnalysisError::Contract(e.to_string()))
}

fn parse_bullet_lines(response: &str) -> Vec<String> {
    lazy_static::lazy_static! {
        static ref BULLET_RE: Regex = Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+(.+?)\s*$").unwrap();
    }

    response
        .lines()
        .filter_map(|line| BULLET_RE.captures(line))
        .map(|cap| cap[1].trim_matches('"').to_string())
        .collect()
}
