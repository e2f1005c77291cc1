pub mod excel;

use crate::cli::ReportFormat;
use crate::error::Result;
use crate::report::ReportDocument;
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ指定の場合のファイル名
pub const DEFAULT_REPORT_STEM: &str = "imgqc-report";

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_REPORT_STEM, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let json_path = output.join(format!("{}.json", DEFAULT_REPORT_STEM));
        let excel_path = output.join(format!("{}.xlsx", DEFAULT_REPORT_STEM));
        (json_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_REPORT_STEM);
        let json_path = parent.join(format!("{}.json", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (json_path, excel_path)
    }
}

/// レポートを書き出し、出力したパスを返す
pub fn export_report(doc: &ReportDocument, format: ReportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() && !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::new();
    match format {
        ReportFormat::Json => {
            let path = output_path_for_format(output, "json");
            write_json(doc, &path)?;
            written.push(path);
        }
        ReportFormat::Excel => {
            let path = output_path_for_format(output, "xlsx");
            println!("- Excelを生成中...");
            excel::generate_excel(doc, &path)?;
            println!("✔ Excel出力: {}", path.display());
            written.push(path);
        }
        ReportFormat::Both => {
            let (json_path, excel_path) = output_paths_for_both(output);
            write_json(doc, &json_path)?;
            written.push(json_path);

            println!("- Excelを生成中...");
            excel::generate_excel(doc, &excel_path)?;
            println!("✔ Excel出力: {}", excel_path.display());
            written.push(excel_path);
        }
    }

    Ok(written)
}

fn write_json(doc: &ReportDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    println!("✔ JSON出力: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/result.json"), "json");
        assert_eq!(path, PathBuf::from("out/result.json"));
    }

    #[test]
    fn test_output_path_for_dir_without_extension() {
        let path = output_path_for_format(Path::new("out"), "xlsx");
        assert_eq!(path, PathBuf::from("out/imgqc-report.xlsx"));
    }

    #[test]
    fn test_output_paths_for_both_share_stem() {
        let (json, xlsx) = output_paths_for_both(Path::new("out/run1.json"));
        assert_eq!(json, PathBuf::from("out/run1.json"));
        assert_eq!(xlsx, PathBuf::from("out/run1.xlsx"));
    }
}
