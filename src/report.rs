//! 実行結果の表示とレポート文書

use crate::orchestrator::RunReport;
use imgqc_common::{
    chart_data, ChartData, ConfusionMatrix, Label, Outcome, RunPlan, Skipped, Summary, UploadStatus,
};
use serde::Serialize;

/// JSON/Excel出力用のレポート
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub generated_at: String,
    pub endpoint: String,
    pub summary: Summary,
    pub outcomes: Vec<Outcome>,
    pub skipped: Vec<Skipped>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<ConfusionMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartData>,
}

impl ReportDocument {
    pub fn from_run(report: &RunReport, endpoint: &str) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            endpoint: endpoint.to_string(),
            summary: report.session.summary(),
            outcomes: report.session.outcomes().to_vec(),
            skipped: report.skipped.clone(),
            confusion_matrix: report.matrix,
            accuracy: report.matrix.and_then(|m| m.accuracy()),
            chart: report.matrix.as_ref().map(chart_data),
        }
    }
}

pub fn print_plan(plan: &RunPlan) {
    if plan.selection.input_files > 0 {
        println!(
            "  個別選択: {}件 → {}バッチ",
            plan.selection.input_files,
            plan.selection.batches.len()
        );
    }
    if plan.folder.input_files > 0 {
        println!(
            "  フォルダ: {}件 → {}バッチ",
            plan.folder.input_files,
            plan.folder.batches.len()
        );
    }

    let batches = plan.selection.batches.iter().chain(plan.folder.batches.iter());
    for (i, batch) in batches.enumerate() {
        println!(
            "  {:>3}. {} [{}] {}",
            i + 1,
            batch.sample_id(),
            batch.ground_truth(),
            batch.file_names().join(", ")
        );
    }

    print_skipped(plan.skipped());
}

pub fn print_skipped<'a>(skipped: impl IntoIterator<Item = &'a Skipped>) {
    let mut header = false;
    for s in skipped {
        if !header {
            println!("\n⚠ スキップ:");
            header = true;
        }
        println!("  - {} ({})", s.file_names.join(", "), s.reason);
    }
}

pub fn print_report(report: &RunReport) {
    println!("結果:");
    for outcome in report.session.outcomes() {
        let mark = match outcome.status {
            UploadStatus::Uploaded => "✔",
            UploadStatus::Failed => "✘",
        };
        print!(
            "  {} {:<20} 正解: {:<8} 予測: {:<8} [{}]",
            mark, outcome.sample_id, outcome.ground_truth, outcome.predicted, outcome.mode
        );
        match &outcome.failure {
            Some(failure) => println!(" {}", failure),
            None => println!(),
        }
    }

    let summary = report.session.summary();
    println!(
        "\n  合計: {}件（成功 {} / 失敗 {} / 集計対象 {}）",
        summary.total, summary.uploaded, summary.failed, summary.counted
    );

    if let Some(matrix) = &report.matrix {
        println!();
        print_matrix(matrix);
    }
}

pub fn print_matrix(matrix: &ConfusionMatrix) {
    println!("混同行列（行: 正解 / 列: 予測）");
    println!("  {:<10}{:>10}{:>10}", "", Label::Correct, Label::Faulty);
    for truth in Label::ALL {
        println!(
            "  {:<10}{:>10}{:>10}",
            truth.as_str(),
            matrix.get(truth, Label::Correct),
            matrix.get(truth, Label::Faulty)
        );
    }

    match matrix.accuracy() {
        Some(acc) => println!("  正解率: {:.1}%", acc * 100.0),
        None => println!("  正解率: -"),
    }

    let chart = chart_data(matrix);
    println!("\n  {:<16}{:>10}{:>10}", "系列", chart.labels[0], chart.labels[1]);
    for series in &chart.datasets {
        println!("  {:<16}{:>10}{:>10}", series.label, series.data[0], series.data[1]);
    }
}
