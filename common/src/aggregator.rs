//! 結果集計
//!
//! 結果ログ全体から2x2の混同行列を毎回作り直し、
//! 棒グラフ用の4系列に変換する

use crate::types::{Label, Outcome, UploadStatus};
use serde::{Deserialize, Serialize};

/// グラフのカテゴリ（予測クラス）
pub const CATEGORY_LABELS: [&str; 2] = ["CORRECT", "FAULTY"];

/// 混同行列 `[正解][予測]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionMatrix {
    cells: [[u32; 2]; 2],
}

impl ConfusionMatrix {
    /// 正解・予測の両方が CORRECT/FAULTY の結果だけを数える
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut matrix = Self::default();
        for outcome in outcomes {
            if let Some(predicted) = outcome.predicted.label() {
                matrix.add(outcome.ground_truth, predicted);
            }
        }
        matrix
    }

    pub fn add(&mut self, truth: Label, predicted: Label) {
        let cell = &mut self.cells[truth.index()][predicted.index()];
        *cell = cell.saturating_add(1);
    }

    pub fn get(&self, truth: Label, predicted: Label) -> u32 {
        self.cells[truth.index()][predicted.index()]
    }

    pub fn cells(&self) -> [[u32; 2]; 2] {
        self.cells
    }

    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    /// 正解率。行列が空なら `None`
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let hits = self.get(Label::Correct, Label::Correct) + self.get(Label::Faulty, Label::Faulty);
        Some(hits as f64 / total as f64)
    }
}

/// 棒グラフの1系列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    /// CATEGORY_LABELS の順（CORRECT, FAULTY）
    pub data: [u32; 2],
}

/// 棒グラフ用データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: [&'static str; 2],
    pub datasets: Vec<ChartSeries>,
}

/// 混同行列から4系列を作る
///
/// 各セルは対応するカテゴリ側にだけ値を置き、もう一方は0
pub fn chart_data(matrix: &ConfusionMatrix) -> ChartData {
    use Label::{Correct, Faulty};

    ChartData {
        labels: CATEGORY_LABELS,
        datasets: vec![
            ChartSeries {
                label: "True Correct",
                data: [matrix.get(Correct, Correct), 0],
            },
            ChartSeries {
                label: "False Faulty",
                data: [matrix.get(Correct, Faulty), 0],
            },
            ChartSeries {
                label: "False Correct",
                data: [0, matrix.get(Faulty, Correct)],
            },
            ChartSeries {
                label: "True Faulty",
                data: [0, matrix.get(Faulty, Faulty)],
            },
        ],
    }
}

/// 結果ログの件数サマリ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub uploaded: usize,
    pub failed: usize,
    /// 混同行列に数えられた件数
    pub counted: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.status {
                UploadStatus::Uploaded => summary.uploaded += 1,
                UploadStatus::Failed => summary.failed += 1,
            }
            if outcome.is_counted() {
                summary.counted += 1;
            }
        }
        summary
    }
}
