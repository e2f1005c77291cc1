//! imgqc 共通ライブラリ
//!
//! ファイル名解析・トリプレット分割・並べ替え・混同行列集計など、
//! CLIから使われる純粋なパイプライン処理

pub mod types;
pub mod error;
pub mod filename;
pub mod sorter;
pub mod grouper;
pub mod staging;
pub mod plan;
pub mod session;
pub mod aggregator;
pub mod export;

pub use types::{
    Batch, Label, Outcome, Predicted, SkipReason, Skipped, SubmitMode, UploadStatus,
    UploadedFile, BATCH_SIZE, UNKNOWN_SAMPLE_ID,
};
pub use error::{Error, Result};
pub use filename::{extract_group_key, ground_truth, sample_id};
pub use sorter::{file_priority, sort_files};
pub use grouper::{group_by_key, seal_groups, FileGroup};
pub use staging::{Staging, MAX_SELECTED_FILES};
pub use plan::{plan_folder, plan_run, plan_selection, BatchPlan, RunPlan};
pub use session::Session;
pub use aggregator::{chart_data, ChartData, ChartSeries, ConfusionMatrix, Summary, CATEGORY_LABELS};
