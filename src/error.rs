use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("物件が見つかりません: {0}")]
    PropertyNotFound(String),

    #[error("閲覧専用のため編集できません: {0}")]
    ReadOnly(String),

    #[error("ログインしていません。`property-inspect login --name NAME --email EMAIL` でログインしてください")]
    NotLoggedIn,

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("対話入力エラー: {0}")]
    Dialog(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] property_inspect_common::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;
