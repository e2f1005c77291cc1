//! 分類エンドポイント連携
//!
//! `POST /checkImageQuality` にトリプレットを multipart で送り、
//! `{"result": "..."}` を受け取る

use crate::error::{ImgQcError, Result};
use imgqc_common::Batch;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("imgqc/", env!("CARGO_PKG_VERSION"));

/// エンドポイントのレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default)]
    pub result: Option<String>,
}

/// 1バッチの送信エラー（Failed として記録される）
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("レスポンスの解析に失敗: {0}")]
    Decode(String),
}

/// トリプレットを分類する外部サービス
pub trait Classifier {
    fn classify(
        &self,
        batch: &Batch,
    ) -> impl Future<Output = std::result::Result<ClassifyResponse, ClassifyError>>;
}

/// HTTP経由の分類クライアント
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ImgQcError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    async fn classify(&self, batch: &Batch) -> std::result::Result<ClassifyResponse, ClassifyError> {
        let form = build_form(batch)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        parse_response(&body)
    }
}

/// `file1`..`file3` にスロット順でファイルを割り当てる
fn build_form(batch: &Batch) -> std::result::Result<Form, ClassifyError> {
    let mut form = Form::new();
    for (field, file) in batch.form_fields() {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(mime_for(&file.name))
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        form = form.part(field, part);
    }
    Ok(form)
}

/// 空ボディや `null` は result なしとして扱う
pub fn parse_response(body: &str) -> std::result::Result<ClassifyResponse, ClassifyError> {
    if body.trim().is_empty() {
        return Ok(ClassifyResponse::default());
    }
    serde_json::from_str::<Option<ClassifyResponse>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ClassifyError::Decode(e.to_string()))
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_result() {
        let response = parse_response(r#"{"result": "faulty"}"#).unwrap();
        assert_eq!(response.result.as_deref(), Some("faulty"));
    }

    #[test]
    fn test_parse_response_missing_result() {
        assert_eq!(parse_response("{}").unwrap(), ClassifyResponse::default());
        assert_eq!(parse_response(r#"{"result": null}"#).unwrap(), ClassifyResponse::default());
        assert_eq!(parse_response("null").unwrap(), ClassifyResponse::default());
        assert_eq!(parse_response("  ").unwrap(), ClassifyResponse::default());
    }

    #[test]
    fn test_parse_response_invalid() {
        assert!(matches!(parse_response("<html>"), Err(ClassifyError::Decode(_))));
        assert!(matches!(parse_response(r#"{"result": 1}"#), Err(ClassifyError::Decode(_))));
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("a.PNG"), "image/png");
        assert_eq!(mime_for("b.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_classify_error_display() {
        assert_eq!(ClassifyError::Status(500).to_string(), "HTTP 500");
    }
}
