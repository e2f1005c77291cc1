//! 一括処理
//!
//! 計画 → 個別選択バッチ送信 → フォルダバッチ送信 → 集計。
//! 送信は常に1件ずつ（前のバッチの結果を記録してから次を送る）

use crate::classifier::Classifier;
use crate::error::{ImgQcError, Result};
use crate::submitter::submit;
use imgqc_common::{plan_run, Batch, ConfusionMatrix, RunPlan, Session, Skipped, Staging, SubmitMode};
use indicatif::ProgressBar;

/// 1回の実行結果
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 実行後のセッション（渡されたログ + 今回の結果）
    pub session: Session,
    pub skipped: Vec<Skipped>,
    /// フォルダ処理を行った場合のみ集計する
    pub matrix: Option<ConfusionMatrix>,
    /// 今回送信したバッチ数
    pub submitted: usize,
}

/// 送信可能か確認して計画を作る
pub fn prepare(staging: Staging) -> Result<RunPlan> {
    if !staging.can_submit() {
        return Err(ImgQcError::NothingToSubmit);
    }
    Ok(plan_run(staging))
}

pub async fn execute<C: Classifier>(
    classifier: &C,
    session: Session,
    plan: RunPlan,
    progress: &ProgressBar,
) -> RunReport {
    let RunPlan { selection, folder } = plan;

    let skipped: Vec<Skipped> = selection
        .skipped
        .into_iter()
        .chain(folder.skipped)
        .collect();
    for s in &skipped {
        tracing::info!(files = ?s.file_names, reason = %s.reason, "Files skipped");
    }

    let submitted = selection.batches.len() + folder.batches.len();

    let session = submit_all(classifier, session, &selection.batches, SubmitMode::Selection, progress).await;
    let session = submit_all(classifier, session, &folder.batches, SubmitMode::Folder, progress).await;

    // 集計はログ全体から作り直す
    let matrix = (folder.input_files > 0).then(|| session.confusion_matrix());

    progress.finish_and_clear();

    RunReport {
        session,
        skipped,
        matrix,
        submitted,
    }
}

async fn submit_all<C: Classifier>(
    classifier: &C,
    mut session: Session,
    batches: &[Batch],
    mode: SubmitMode,
    progress: &ProgressBar,
) -> Session {
    for batch in batches {
        // ログ上の位置を通し番号にする（モード・実行をまたいで一意）
        let index = session.len();
        progress.set_message(batch.display_id(index));
        let outcome = submit(classifier, batch, mode, index).await;
        session = session.record(outcome);
        progress.inc(1);
    }
    session
}
