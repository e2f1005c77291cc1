use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgqc")]
#[command(about = "画像トリプレット品質判定・混同行列集計ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// トリプレットを分類エンドポイントへ送信し、混同行列を集計
    Run {
        /// 個別に送信する画像（ちょうど3件、複数回指定）
        #[arg(short = 'f', long = "file")]
        files: Vec<PathBuf>,

        /// 画像フォルダ（ファイル名の番号で3件ずつまとめる）
        #[arg(short = 'd', long)]
        folder: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 分類エンドポイントURL（設定ファイルより優先）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// レポート出力先（ファイル/ディレクトリ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポート形式 (json/excel/both)
        #[arg(long, default_value = "json")]
        format: ReportFormat,

        /// 確認せずに送信
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 送信せずにバッチ分割の結果を表示
    Plan {
        /// 画像フォルダ
        #[arg(short = 'd', long)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// エンドポイントURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// タイムアウト秒数を設定（0で無制限）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Excel => write!(f, "excel"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}
