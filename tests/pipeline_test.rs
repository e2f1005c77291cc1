//! フォルダ読み込みから集計までの統合テスト（分類器はテスト用の固定実装）

use imgqc_common::{Batch, Label, Predicted, Session, SkipReason, Staging, SubmitMode, UploadStatus};
use imgqc_rust::classifier::{Classifier, ClassifyError, ClassifyResponse};
use imgqc_rust::{orchestrator, scanner};
use indicatif::ProgressBar;
use std::path::Path;
use tempfile::tempdir;

/// サンプルIDの先頭文字で予測を返す（C→correct, F→faulty）
struct ByPrefix;

impl Classifier for ByPrefix {
    async fn classify(&self, batch: &Batch) -> Result<ClassifyResponse, ClassifyError> {
        let result = match batch.sample_id().chars().next() {
            Some('C') => "correct",
            Some('F') => "faulty",
            _ => return Err(ClassifyError::Status(503)),
        };
        Ok(ClassifyResponse {
            result: Some(result.to_string()),
        })
    }
}

fn write(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), name.as_bytes()).unwrap();
}

#[tokio::test]
async fn test_folder_to_matrix() {
    let dir = tempdir().expect("Failed to create temp dir");
    for name in [
        "blanc_C01.png", "written_C01.png", "C01.png",
        "blanc_F02.png", "written_F02.png", "F02.png",
        "blanc_F03.png", "written_F03.png",
        "notes.png",
        "readme.txt",
    ] {
        write(dir.path(), name);
    }

    let images = scanner::scan_folder(dir.path(), false).unwrap();
    assert_eq!(images.len(), 9);

    let mut staging = Staging::new();
    staging.add_folder(scanner::load_images(&images).unwrap());

    let plan = orchestrator::prepare(staging).unwrap();
    assert_eq!(plan.batch_count(), 2);

    let report = orchestrator::execute(&ByPrefix, Session::new(), plan, &ProgressBar::hidden()).await;

    let ids: Vec<&str> = report.session.outcomes().iter().map(|o| o.sample_id.as_str()).collect();
    assert_eq!(ids, vec!["C01", "F02"]);
    assert!(report.session.outcomes().iter().all(|o| o.mode == SubmitMode::Folder));

    let reasons: Vec<&SkipReason> = report.skipped.iter().map(|s| &s.reason).collect();
    assert!(reasons.contains(&&SkipReason::NoNumericKey));
    assert!(reasons.contains(&&SkipReason::IncompleteGroup { key: 3 }));

    let matrix = report.matrix.unwrap();
    assert_eq!(matrix.get(Label::Correct, Label::Correct), 1);
    assert_eq!(matrix.get(Label::Faulty, Label::Faulty), 1);
    assert_eq!(matrix.accuracy(), Some(1.0));
}

#[tokio::test]
async fn test_recursive_scan_groups_across_subfolders() {
    let dir = tempdir().expect("Failed to create temp dir");
    let sub = dir.path().join("day2");
    std::fs::create_dir(&sub).unwrap();
    write(dir.path(), "blanc_C04.png");
    write(&sub, "written_C04.png");
    write(&sub, "C04.png");

    assert!(scanner::scan_folder(dir.path(), false).unwrap().len() == 1);

    let images = scanner::scan_folder(dir.path(), true).unwrap();
    let mut staging = Staging::new();
    staging.add_folder(scanner::load_images(&images).unwrap());

    let plan = orchestrator::prepare(staging).unwrap();
    let report = orchestrator::execute(&ByPrefix, Session::new(), plan, &ProgressBar::hidden()).await;
    assert_eq!(report.session.len(), 1);
    assert_eq!(report.session.outcomes()[0].predicted, Predicted::Correct);
}

#[tokio::test]
async fn test_selection_and_folder_share_log() {
    let dir = tempdir().expect("Failed to create temp dir");
    for name in ["blanc_9.png", "written_9.png", "Z9.png"] {
        write(dir.path(), name);
    }
    let paths: Vec<_> = ["Z9.png", "written_9.png", "blanc_9.png"]
        .iter()
        .map(|n| dir.path().join(n))
        .collect();

    let mut staging = Staging::new();
    staging.add_selected(scanner::load_files(&paths).unwrap()).unwrap();
    assert_eq!(staging.add_folder(scanner::load_files(&paths).unwrap()), 3);
    // 同じファイルの重複追加は無視される
    assert_eq!(staging.add_folder(scanner::load_files(&paths).unwrap()), 0);

    let plan = orchestrator::prepare(staging).unwrap();
    let report = orchestrator::execute(&ByPrefix, Session::new(), plan, &ProgressBar::hidden()).await;

    let outcomes = report.session.outcomes();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].mode, SubmitMode::Selection);
    assert_eq!(outcomes[0].sample_id, "Z9");
    assert_eq!(outcomes[0].status, UploadStatus::Failed);
    assert_eq!(outcomes[1].mode, SubmitMode::Folder);
    assert_eq!(outcomes[1].failure.as_deref(), Some("HTTP 503"));
    // 失敗は集計対象外
    assert_eq!(report.matrix.map(|m| m.total()), Some(0));
}
