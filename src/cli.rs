use crate::ai_provider::AiProvider;
use clap::{Args, Parser, Subcommand};
use property_inspect_common::{PropertyPatch, PropertyStatus};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "property-inspect")]
#[command(about = "物件インスペクション（音声メモ・写真AI解析）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ（省略時は設定ファイルの値）
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// インスペクション対象の物件一覧
    Properties,

    /// 物件の詳細を表示/編集
    Details {
        /// 物件ID
        #[arg(required = true)]
        id: String,

        /// 閲覧専用で開く（編集不可）
        #[arg(long)]
        read_only: bool,

        #[command(flatten)]
        edit: DetailsEdit,
    },

    /// 対話式でインスペクションを実施
    Inspect {
        /// 物件ID
        #[arg(required = true)]
        id: String,

        /// 写真フォルダ（省略時はカレント）
        #[arg(short, long)]
        photos: Option<PathBuf>,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 録音→停止→写真解析→完了を一括実行
    Run {
        /// 物件ID
        #[arg(required = true)]
        id: String,

        /// 解析する写真
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// レポートJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保存済みレポートを表示
    Report {
        /// レポートJSON
        #[arg(required = true)]
        path: PathBuf,
    },

    /// ログイン（担当者を保存）
    Login {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// ユーザーID（省略時はメールアドレス）
        #[arg(long)]
        uid: Option<String>,
    },

    /// ログアウト
    Logout,

    /// ログイン中の担当者を表示
    Profile,

    /// 設定を表示/編集
    Config {
        /// AIプロバイダを設定
        #[arg(long)]
        set_provider: Option<AiProvider>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 詳細画面の編集項目
#[derive(Args, Debug, Default)]
pub struct DetailsEdit {
    /// 所在地を変更
    #[arg(long)]
    pub set_location: Option<String>,

    /// 価格を変更
    #[arg(long)]
    pub set_price: Option<u64>,

    /// 概要を変更
    #[arg(long)]
    pub set_overview: Option<String>,

    /// 状態を変更（available / pending）
    #[arg(long)]
    pub set_status: Option<PropertyStatus>,
}

impl DetailsEdit {
    pub fn into_patch(self) -> PropertyPatch {
        PropertyPatch {
            location: self.set_location,
            price: self.set_price,
            overview: self.set_overview,
            status: self.set_status,
        }
    }
}
