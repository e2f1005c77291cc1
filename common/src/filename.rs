//! ファイル名規約の解析
//!
//! - 最初の数字列 → グループ番号
//! - 最初の `.` より前 → サンプルID
//! - `C0` を含む → 正解ラベル CORRECT

use crate::types::Label;
use regex::Regex;

/// 正解（CORRECT）サンプルを示すファイル名の目印
pub const CORRECT_MARKER: &str = "C0";

/// ファイル名の最初の数字列をグループ番号として取り出す
///
/// 数字がない、または u64 に収まらない場合は `None`
///
/// # Examples
/// ```
/// use imgqc_common::extract_group_key;
///
/// assert_eq!(extract_group_key("C01_blanc.png"), Some(1));
/// assert_eq!(extract_group_key("blanc.png"), None);
/// ```
pub fn extract_group_key(file_name: &str) -> Option<u64> {
    lazy_static::lazy_static! {
        static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();
    }

    DIGIT_RUN
        .find(file_name)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// 最初の `.` より前の部分
pub fn sample_id(file_name: &str) -> &str {
    match file_name.split_once('.') {
        Some((head, _)) => head,
        None => file_name,
    }
}

/// いずれかのファイル名が `C0` を含めば CORRECT、それ以外は FAULTY
pub fn ground_truth<'a>(file_names: impl IntoIterator<Item = &'a str>) -> Label {
    if file_names.into_iter().any(|name| name.contains(CORRECT_MARKER)) {
        Label::Correct
    } else {
        Label::Faulty
    }
}
