//! ログイン中ユーザーの保存
//!
//! プロセス全体で1ユーザー分のスロット。グローバル変数ではなく、
//! 読み込んだストアを必要な側へ明示的に渡す。

use crate::config::Config;
use crate::error::Result;
use property_inspect_common::User;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    user: Option<User>,
}

impl SessionStore {
    /// 既定の保存先
    pub fn default_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join(SESSION_FILE_NAME))
    }

    /// 読み込み（ファイルがなければ空）
    pub fn load(path: &Path) -> Result<Self> {
        let user = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: SessionFile = serde_json::from_str(&content)?;
            file.user
        } else {
            None
        };
        debug!(path = %path.display(), logged_in = user.is_some(), "セッション読み込み");

        Ok(Self {
            path: path.to_path_buf(),
            user,
        })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = SessionFile {
            user: self.user.clone(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    pub fn get(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set(&mut self, user: User) {
        self.user = Some(user);
    }

    /// ユーザーを消してファイルも削除
    pub fn clear(&mut self) -> Result<()> {
        self.user = None;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
