//! 送信前のファイル置き場
//!
//! 個別選択（最大3件）とフォルダ/ドロップ（件数制限なし）を保持する。
//! どちらも (name, size) で重複を除く

use crate::error::{Error, Result};
use crate::types::UploadedFile;

/// 個別選択の上限
pub const MAX_SELECTED_FILES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Staging {
    selected: Vec<UploadedFile>,
    folder: Vec<UploadedFile>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    /// 個別選択に追加
    ///
    /// 追加後に上限を超える場合は何も追加せずエラー。
    /// 判定は重複除去の前の件数で行う。戻り値は実際に追加した件数
    pub fn add_selected(&mut self, files: Vec<UploadedFile>) -> Result<usize> {
        if self.selected.len() + files.len() > MAX_SELECTED_FILES {
            return Err(Error::TooManyFiles {
                staged: self.selected.len(),
                incoming: files.len(),
                max: MAX_SELECTED_FILES,
            });
        }
        Ok(push_unique(&mut self.selected, files))
    }

    /// フォルダ/ドロップのファイルを追加。戻り値は実際に追加した件数
    pub fn add_folder(&mut self, files: Vec<UploadedFile>) -> usize {
        push_unique(&mut self.folder, files)
    }

    pub fn remove_selected(&mut self, index: usize) -> Option<UploadedFile> {
        (index < self.selected.len()).then(|| self.selected.remove(index))
    }

    pub fn remove_folder(&mut self, index: usize) -> Option<UploadedFile> {
        (index < self.folder.len()).then(|| self.folder.remove(index))
    }

    pub fn selected(&self) -> &[UploadedFile] {
        &self.selected
    }

    pub fn folder(&self) -> &[UploadedFile] {
        &self.folder
    }

    /// 送信可能か: 個別選択がちょうど3件、またはフォルダが3件以上
    pub fn can_submit(&self) -> bool {
        self.selected.len() == MAX_SELECTED_FILES || self.folder.len() >= MAX_SELECTED_FILES
    }

    pub fn into_parts(self) -> (Vec<UploadedFile>, Vec<UploadedFile>) {
        (self.selected, self.folder)
    }
}

fn push_unique(target: &mut Vec<UploadedFile>, files: Vec<UploadedFile>) -> usize {
    let mut added = 0;
    for file in files {
        if !target.iter().any(|existing| existing.same_identity(&file)) {
            target.push(file);
            added += 1;
        }
    }
    added
}
