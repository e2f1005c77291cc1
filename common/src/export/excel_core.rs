//! Excelレポート生成（共通ライブラリ）
//!
//! 結果ログシートと、混同行列＋棒グラフのシートを持つブックを生成

use crate::aggregator::{chart_data, ConfusionMatrix};
use crate::types::Outcome;
use rust_xlsxwriter::*;

pub const OUTCOME_SHEET: &str = "Outcomes";
pub const MATRIX_SHEET: &str = "Matrix";

const OUTCOME_HEADERS: [&str; 7] = [
    "Sample", "Ground Truth", "Predicted", "Status", "Mode", "Batch", "Failure",
];

/// グラフ用データ表の先頭行（カテゴリ見出し）
const SERIES_HEADER_ROW: u32 = 4;

/// Excelをバッファに生成
///
/// # Arguments
/// * `outcomes` - 結果ログ（送信順）
/// * `matrix` - 混同行列（集計していない場合は `None`、Matrixシートを作らない）
pub fn generate_report_buffer(
    outcomes: &[Outcome],
    matrix: Option<&ConfusionMatrix>,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    // 結果ログ
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(OUTCOME_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, header) in OUTCOME_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }

        for (i, outcome) in outcomes.iter().enumerate() {
            let row = i as u32 + 1;
            let values = [
                outcome.sample_id.clone(),
                outcome.ground_truth.to_string(),
                outcome.predicted.to_string(),
                outcome.status.to_string(),
                outcome.mode.to_string(),
                (outcome.batch_index + 1).to_string(),
                outcome.failure.clone().unwrap_or_default(),
            ];
            for (col, value) in values.iter().enumerate() {
                worksheet.write_string(row, col as u16, value.as_str())
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }

        worksheet.set_column_width(0, 20)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.set_column_width(6, 40)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    if let Some(matrix) = matrix {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(MATRIX_SHEET)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        // 混同行列（行: 正解, 列: 予測）
        worksheet.write_string_with_format(0, 0, "Truth \\ Predicted", &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        let chart = chart_data(matrix);
        for (i, label) in chart.labels.iter().enumerate() {
            worksheet.write_string_with_format(0, i as u16 + 1, *label, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
            worksheet.write_string_with_format(i as u32 + 1, 0, *label, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }
        for (truth, row) in matrix.cells().iter().enumerate() {
            for (predicted, count) in row.iter().enumerate() {
                worksheet.write_number(truth as u32 + 1, predicted as u16 + 1, *count)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }

        // グラフ用データ表
        worksheet.write_string_with_format(SERIES_HEADER_ROW, 0, "Series", &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        for (i, label) in chart.labels.iter().enumerate() {
            worksheet.write_string_with_format(SERIES_HEADER_ROW, i as u16 + 1, *label, &header_format)
                .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
        }

        let mut bar_chart = Chart::new(ChartType::ColumnStacked);
        for (i, series) in chart.datasets.iter().enumerate() {
            let row = SERIES_HEADER_ROW + 1 + i as u32;
            worksheet.write_string(row, 0, series.label)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            for (col, value) in series.data.iter().enumerate() {
                worksheet.write_number(row, col as u16 + 1, *value)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }

            bar_chart
                .add_series()
                .set_name(series.label)
                .set_categories((MATRIX_SHEET, SERIES_HEADER_ROW, 1, SERIES_HEADER_ROW, 2))
                .set_values((MATRIX_SHEET, row, 1, row, 2));
        }

        bar_chart.title().set_name("Confusion Matrix");
        bar_chart.x_axis().set_name("Predicted Class");
        bar_chart.y_axis().set_name("Number of Samples");

        worksheet.set_column_width(0, 18)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.insert_chart(SERIES_HEADER_ROW + 7, 0, &bar_chart)
            .map_err(|e| format!("グラフ挿入エラー: {}", e))?;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Batch, Predicted, SubmitMode, UploadedFile};

    fn outcomes() -> Vec<Outcome> {
        let batch = Batch::new(vec![
            UploadedFile::new("blanc_1.png", vec![]),
            UploadedFile::new("written_1.png", vec![]),
            UploadedFile::new("C01.png", vec![]),
        ])
        .unwrap();
        vec![
            Outcome::uploaded(&batch, SubmitMode::Folder, 0, Predicted::Faulty),
            Outcome::failed(&batch, SubmitMode::Folder, 1, "HTTP 500"),
        ]
    }

    #[test]
    fn test_generate_report_buffer_with_matrix() {
        let outcomes = outcomes();
        let matrix = ConfusionMatrix::from_outcomes(&outcomes);
        let buffer = generate_report_buffer(&outcomes, Some(&matrix)).expect("Excel生成失敗");

        // xlsx は zip 形式
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_report_buffer_without_matrix() {
        let buffer = generate_report_buffer(&outcomes(), None).expect("Excel生成失敗");
        assert!(!buffer.is_empty());
    }
}
