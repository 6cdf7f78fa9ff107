use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// 固定遅延＋固定ラベルのモック
    #[default]
    Mock,
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    /// 外部CLIのコマンド名（モックはなし）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::Mock => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
            AiProvider::Gemini => Some("gemini"),
        }
    }

    /// プロンプトを渡す引数列
    pub fn prompt_args(&self, prompt: &str) -> Vec<String> {
        match self {
            AiProvider::Mock => Vec::new(),
            AiProvider::Claude => vec![
                "-p".into(),
                prompt.into(),
                "--output-format".into(),
                "text".into(),
            ],
            AiProvider::Codex => vec!["exec".into(), prompt.into()],
            AiProvider::Gemini => vec!["-p".into(), prompt.into()],
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::Mock => write!(f, "mock"),
            AiProvider::Claude => write!(f, "claude"),
            AiProvider::Codex => write!(f, "codex"),
            AiProvider::Gemini => write!(f, "gemini"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name() {
        assert_eq!(AiProvider::Mock.command_name(), None);
        assert_eq!(AiProvider::Claude.command_name(), Some("claude"));
        assert_eq!(AiProvider::Gemini.command_name(), Some("gemini"));
    }

    #[test]
    fn test_claude_prompt_args() {
        let args = AiProvider::Claude.prompt_args("hello");
        assert_eq!(args, vec!["-p", "hello", "--output-format", "text"]);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&AiProvider::Codex).unwrap();
        assert_eq!(json, "\"codex\"");
        let parsed: AiProvider = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(parsed, AiProvider::Gemini);
    }
}
