//! バッチ送信
//!
//! 個別選択・フォルダのどちらも同じ `submit` を1件ずつ await する。
//! 1回の送信につき結果は必ず1件

use crate::classifier::Classifier;
use imgqc_common::{Batch, Outcome, Predicted, SubmitMode};

/// `index` は結果ログ全体での通し番号
pub async fn submit<C: Classifier>(
    classifier: &C,
    batch: &Batch,
    mode: SubmitMode,
    index: usize,
) -> Outcome {
    let sample = batch.display_id(index);
    tracing::debug!(
        sample = %sample,
        mode = %mode,
        files = ?batch.file_names(),
        ground_truth = %batch.ground_truth(),
        "Submitting batch"
    );

    match classifier.classify(batch).await {
        Ok(response) => {
            let predicted = Predicted::from_result(response.result.as_deref());
            tracing::info!(sample = %sample, predicted = %predicted, "Batch classified");
            Outcome::uploaded(batch, mode, index, predicted)
        }
        Err(err) => {
            tracing::warn!(sample = %sample, error = %err, "Batch upload failed");
            Outcome::failed(batch, mode, index, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifyError, ClassifyResponse};
    use imgqc_common::{Label, UploadStatus, UploadedFile};

    struct Fixed(fn() -> Result<ClassifyResponse, ClassifyError>);

    impl Classifier for Fixed {
        async fn classify(&self, _batch: &Batch) -> Result<ClassifyResponse, ClassifyError> {
            (self.0)()
        }
    }

    fn correct_batch() -> Batch {
        Batch::new(vec![
            UploadedFile::new("C01_blanc.png", vec![1]),
            UploadedFile::new("C01_written.png", vec![2]),
            UploadedFile::new("C01_3.png", vec![3]),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_success_faulty() {
        let classifier = Fixed(|| {
            Ok(ClassifyResponse {
                result: Some("faulty".to_string()),
            })
        });
        let outcome = submit(&classifier, &correct_batch(), SubmitMode::Folder, 0).await;

        assert_eq!(outcome.sample_id, "C01_3");
        assert_eq!(outcome.ground_truth, Label::Correct);
        assert_eq!(outcome.predicted, Predicted::Faulty);
        assert_eq!(outcome.status, UploadStatus::Uploaded);
        assert!(outcome.failure.is_none());
    }

    #[tokio::test]
    async fn test_submit_success_without_result() {
        let classifier = Fixed(|| Ok(ClassifyResponse::default()));
        let outcome = submit(&classifier, &correct_batch(), SubmitMode::Selection, 0).await;

        assert_eq!(outcome.predicted, Predicted::Unknown);
        assert_eq!(outcome.status, UploadStatus::Uploaded);
    }

    #[tokio::test]
    async fn test_submit_http_error() {
        let classifier = Fixed(|| Err(ClassifyError::Status(500)));
        let outcome = submit(&classifier, &correct_batch(), SubmitMode::Folder, 2).await;

        assert_eq!(outcome.predicted, Predicted::Unknown);
        assert_eq!(outcome.status, UploadStatus::Failed);
        assert_eq!(outcome.batch_index, 2);
        assert_eq!(outcome.failure.as_deref(), Some("HTTP 500"));
        assert!(!outcome.is_counted());
    }
}
