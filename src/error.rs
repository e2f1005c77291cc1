use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImgQcError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("送信できるバッチがありません（個別選択はちょうど3件、フォルダは3件以上が必要です）")]
    NothingToSubmit,

    #[error("HTTPクライアント初期化エラー: {0}")]
    HttpClient(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("送信を中止しました")]
    Cancelled,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] imgqc_common::Error),
}

pub type Result<T> = std::result::Result<T, ImgQcError>;
