//! 送信計画
//!
//! 置き場のファイルから、個別選択のバッチ・フォルダのバッチ・
//! スキップ一覧を作る。ネットワークには触れない

use crate::grouper::{group_by_key, seal_groups, take_triplets};
use crate::staging::Staging;
use crate::types::{Batch, SkipReason, Skipped, UploadedFile};

/// バッチとスキップされたファイル
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    /// 計画に渡されたファイル数
    pub input_files: usize,
    pub batches: Vec<Batch>,
    pub skipped: Vec<Skipped>,
}

impl BatchPlan {
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// 1回の実行計画（個別選択 → フォルダの順に送信する）
#[derive(Debug, Clone, Default)]
pub struct RunPlan {
    pub selection: BatchPlan,
    pub folder: BatchPlan,
}

impl RunPlan {
    pub fn batch_count(&self) -> usize {
        self.selection.batches.len() + self.folder.batches.len()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Skipped> {
        self.selection.skipped.iter().chain(self.folder.skipped.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.batch_count() == 0
    }
}

/// 個別選択: 並び順のまま3件ずつ。余りは送信しない
pub fn plan_selection(files: Vec<UploadedFile>) -> BatchPlan {
    let input_files = files.len();
    let (batches, leftover) = take_triplets(files);
    let mut skipped = Vec::new();
    if !leftover.is_empty() {
        skipped.push(Skipped::new(&leftover, SkipReason::IncompleteSelection));
    }
    BatchPlan { input_files, batches, skipped }
}

/// フォルダ: 番号でグループ化してから3件ずつ
pub fn plan_folder(files: Vec<UploadedFile>) -> BatchPlan {
    let input_files = files.len();
    let (groups, mut skipped) = group_by_key(files);
    let (batches, leftovers) = seal_groups(groups);
    skipped.extend(leftovers);
    BatchPlan { input_files, batches, skipped }
}

pub fn plan_run(staging: Staging) -> RunPlan {
    let (selected, folder) = staging.into_parts();
    RunPlan {
        selection: plan_selection(selected),
        folder: plan_folder(folder),
    }
}
