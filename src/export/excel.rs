//! Excel出力（CLI版）
//!
//! ブック生成は共通ライブラリ（rust_xlsxwriter）に任せ、ここではファイルに書くだけ

use crate::error::{ImgQcError, Result};
use crate::report::ReportDocument;
use imgqc_common::export::excel_core;
use std::path::Path;

pub fn generate_excel(doc: &ReportDocument, output_path: &Path) -> Result<()> {
    let buffer = excel_core::generate_report_buffer(&doc.outcomes, doc.confusion_matrix.as_ref())
        .map_err(ImgQcError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
