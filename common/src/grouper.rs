//! ファイル名の番号によるグループ化とトリプレット分割

use crate::filename::extract_group_key;
use crate::types::{Batch, SkipReason, Skipped, UploadedFile};
use std::collections::HashMap;

/// 同じ番号を持つファイル群（到着順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub key: u64,
    pub files: Vec<UploadedFile>,
}

/// ファイルを番号ごとにまとめる
///
/// グループの並びは番号の初出順（番号の大小ではない）。
/// 番号のないファイルは `NoNumericKey` としてスキップ
pub fn group_by_key(files: Vec<UploadedFile>) -> (Vec<FileGroup>, Vec<Skipped>) {
    let mut groups: Vec<FileGroup> = Vec::new();
    let mut slots: HashMap<u64, usize> = HashMap::new();
    let mut skipped = Vec::new();

    for file in files {
        match extract_group_key(&file.name) {
            Some(key) => {
                let slot = *slots.entry(key).or_insert_with(|| {
                    groups.push(FileGroup { key, files: Vec::new() });
                    groups.len() - 1
                });
                groups[slot].files.push(file);
            }
            None => skipped.push(Skipped::new(&[file], SkipReason::NoNumericKey)),
        }
    }

    (groups, skipped)
}

/// 各グループの先頭から3件ずつバッチにする
///
/// 3件に満たない余りは `IncompleteGroup` としてスキップ
pub fn seal_groups(groups: Vec<FileGroup>) -> (Vec<Batch>, Vec<Skipped>) {
    let mut batches = Vec::new();
    let mut skipped = Vec::new();

    for group in groups {
        let (sealed, leftover) = take_triplets(group.files);
        batches.extend(sealed);
        if !leftover.is_empty() {
            skipped.push(Skipped::new(&leftover, SkipReason::IncompleteGroup { key: group.key }));
        }
    }

    (batches, skipped)
}

/// 並び順のまま3件ずつ切り出し、余り（0〜2件）を返す
pub(crate) fn take_triplets(files: Vec<UploadedFile>) -> (Vec<Batch>, Vec<UploadedFile>) {
    let mut batches = Vec::new();
    let mut iter = files.into_iter();

    loop {
        match (iter.next(), iter.next(), iter.next()) {
            (Some(a), Some(b), Some(c)) => batches.push(Batch::from_array([a, b, c])),
            (a, b, _) => {
                let leftover = a.into_iter().chain(b).collect();
                return (batches, leftover);
            }
        }
    }
}
