//! トリプレット内のファイル並べ替え
//!
//! 分類エンドポイントはスロット位置でファイルを解釈するため
//! `blanc*` → `written*` → その他 の順に並べる

use crate::types::UploadedFile;

/// ファイル名の優先順位（小さいほど前）
pub fn file_priority(file_name: &str) -> u8 {
    let name = file_name.to_lowercase();
    if name.starts_with("blanc") {
        1
    } else if name.starts_with("written") {
        2
    } else {
        3
    }
}

/// 優先順位で安定ソート（同順位は元の順序を保つ）
pub fn sort_files(files: &mut [UploadedFile]) {
    files.sort_by_key(|f| file_priority(&f.name));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(files: &[UploadedFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    fn files(list: &[&str]) -> Vec<UploadedFile> {
        list.iter().map(|n| UploadedFile::new(*n, Vec::new())).collect()
    }

    #[test]
    fn test_file_priority() {
        assert_eq!(file_priority("blanc_01.png"), 1);
        assert_eq!(file_priority("BLANC.png"), 1);
        assert_eq!(file_priority("Written_01.png"), 2);
        assert_eq!(file_priority("C01_blanc.png"), 3);
        assert_eq!(file_priority("sample.png"), 3);
    }

    #[test]
    fn test_sort_files_priority_order() {
        let mut list = files(&["S12.png", "written12.png", "blanc12.png"]);
        sort_files(&mut list);
        assert_eq!(names(&list), vec!["blanc12.png", "written12.png", "S12.png"]);
    }

    #[test]
    fn test_sort_files_stable_for_ties() {
        let mut list = files(&["z9.png", "a9.png", "blanc9.png"]);
        sort_files(&mut list);
        assert_eq!(names(&list), vec!["blanc9.png", "z9.png", "a9.png"]);
    }

    #[test]
    fn test_sort_files_idempotent() {
        let mut list = files(&["m4.png", "WRITTEN4.png", "x4.png", "Blanc4.png"]);
        sort_files(&mut list);
        let once: Vec<String> = list.iter().map(|f| f.name.clone()).collect();
        sort_files(&mut list);
        let twice: Vec<String> = list.iter().map(|f| f.name.clone()).collect();
        assert_eq!(once, twice);
    }
}
