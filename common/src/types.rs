//! パイプラインの型定義
//!
//! - UploadedFile: 読み込み済みファイル（名前・サイズ・内容）
//! - Batch: 並べ替え済みの3ファイル組（トリプレット）
//! - Outcome: 1バッチ分の判定結果（結果ログに追記のみ）
//! - Skipped: バッチに入らなかったファイルと理由

use crate::error::{Error, Result};
use crate::{filename, sorter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1バッチのファイル数
pub const BATCH_SIZE: usize = 3;

/// サンプルIDが取れなかった送信成功分の表示名
pub const UNKNOWN_SAMPLE_ID: &str = "Unknown";

/// 読み込み済みファイル
///
/// 重複判定のIDは (name, size) の組
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// (name, size) が一致すれば同一ファイルとみなす
    pub fn same_identity(&self, other: &UploadedFile) -> bool {
        self.name == other.name && self.size == other.size
    }
}

/// 正解ラベル / 予測ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Correct,
    Faulty,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Correct, Label::Faulty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Correct => "CORRECT",
            Label::Faulty => "FAULTY",
        }
    }

    /// 混同行列の行/列インデックス
    pub fn index(self) -> usize {
        match self {
            Label::Correct => 0,
            Label::Faulty => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 分類器の予測値
///
/// CORRECT/FAULTY 以外の値（UNKNOWN、想定外のラベル）は
/// 結果ログには残るが混同行列には数えない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Predicted {
    Correct,
    Faulty,
    Unknown,
    Other(String),
}

impl Predicted {
    /// レスポンスの `result` から予測値を生成（大文字化、欠落時は UNKNOWN）
    pub fn from_result(result: Option<&str>) -> Self {
        result
            .map(|r| Predicted::from(r.to_string()))
            .unwrap_or(Predicted::Unknown)
    }

    /// 混同行列に数えられるラベル
    pub fn label(&self) -> Option<Label> {
        match self {
            Predicted::Correct => Some(Label::Correct),
            Predicted::Faulty => Some(Label::Faulty),
            Predicted::Unknown | Predicted::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Predicted::Correct => "CORRECT",
            Predicted::Faulty => "FAULTY",
            Predicted::Unknown => "UNKNOWN",
            Predicted::Other(s) => s,
        }
    }
}

impl From<String> for Predicted {
    fn from(value: String) -> Self {
        let upper = value.to_uppercase();
        match upper.as_str() {
            "CORRECT" => Predicted::Correct,
            "FAULTY" => Predicted::Faulty,
            "UNKNOWN" => Predicted::Unknown,
            _ => Predicted::Other(upper),
        }
    }
}

impl From<Predicted> for String {
    fn from(value: Predicted) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Predicted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 送信結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Uploaded,
    Failed,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStatus::Uploaded => f.pad("Uploaded"),
            UploadStatus::Failed => f.pad("Failed"),
        }
    }
}

/// バッチの出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    /// 個別選択（最大3ファイル）
    Selection,
    /// フォルダ / ドロップ
    Folder,
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitMode::Selection => f.pad("個別"),
            SubmitMode::Folder => f.pad("フォルダ"),
        }
    }
}

/// 並べ替え済みの3ファイル組
///
/// 生成時に必ず優先順位で並べ替える。スロット3のファイル名がサンプルID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    files: [UploadedFile; BATCH_SIZE],
}

impl Batch {
    pub fn new(files: Vec<UploadedFile>) -> Result<Self> {
        let files: [UploadedFile; BATCH_SIZE] = files
            .try_into()
            .map_err(|v: Vec<UploadedFile>| Error::InvalidBatch(v.len()))?;
        Ok(Self::from_array(files))
    }

    pub fn from_array(mut files: [UploadedFile; BATCH_SIZE]) -> Self {
        sorter::sort_files(&mut files);
        Self { files }
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    /// スロット3のファイル名の最初の `.` より前
    pub fn sample_id(&self) -> &str {
        filename::sample_id(&self.files[BATCH_SIZE - 1].name)
    }

    /// 進捗・失敗ログ用の表示名（サンプルIDが空なら `Batch N`、N はログ全体での通し番号）
    pub fn display_id(&self, index: usize) -> String {
        self.sample_id_or(|| format!("Batch {}", index + 1))
    }

    fn sample_id_or(&self, fallback: impl FnOnce() -> String) -> String {
        match self.sample_id() {
            "" => fallback(),
            id => id.to_string(),
        }
    }

    pub fn ground_truth(&self) -> Label {
        filename::ground_truth(self.files.iter().map(|f| f.name.as_str()))
    }

    /// マルチパートのフィールド名 `file1`..`file3` と対応ファイル
    pub fn form_fields(&self) -> impl Iterator<Item = (String, &UploadedFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, file)| (format!("file{}", i + 1), file))
    }
}

/// 1バッチ分の判定結果
///
/// `batch_index` は結果ログ全体での通し番号（モードをまたいで重複しない）。
/// 失敗時の `predicted` は常に UNKNOWN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub sample_id: String,
    pub ground_truth: Label,
    pub predicted: Predicted,
    pub status: UploadStatus,
    pub mode: SubmitMode,
    pub batch_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Outcome {
    pub fn uploaded(batch: &Batch, mode: SubmitMode, index: usize, predicted: Predicted) -> Self {
        Self {
            sample_id: batch.sample_id_or(|| UNKNOWN_SAMPLE_ID.to_string()),
            ground_truth: batch.ground_truth(),
            predicted,
            status: UploadStatus::Uploaded,
            mode,
            batch_index: index,
            failure: None,
        }
    }

    pub fn failed(batch: &Batch, mode: SubmitMode, index: usize, failure: impl Into<String>) -> Self {
        Self {
            sample_id: batch.display_id(index),
            ground_truth: batch.ground_truth(),
            predicted: Predicted::Unknown,
            status: UploadStatus::Failed,
            mode,
            batch_index: index,
            failure: Some(failure.into()),
        }
    }

    /// 混同行列に数えられるか
    pub fn is_counted(&self) -> bool {
        self.predicted.label().is_some()
    }
}

/// バッチに入らなかった理由
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SkipReason {
    /// ファイル名に数字がない
    NoNumericKey,
    /// 同じ番号のファイルが3件に満たない余り
    IncompleteGroup { key: u64 },
    /// 個別選択の3件に満たない余り
    IncompleteSelection,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoNumericKey => write!(f, "ファイル名に番号がありません"),
            SkipReason::IncompleteGroup { key } => write!(f, "番号{}のファイルが3件に満たない余り", key),
            SkipReason::IncompleteSelection => write!(f, "個別選択が3件に満たない余り"),
        }
    }
}

/// スキップされたファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skipped {
    pub file_names: Vec<String>,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(files: &[UploadedFile], reason: SkipReason) -> Self {
        Self {
            file_names: files.iter().map(|f| f.name.clone()).collect(),
            reason,
        }
    }
}
