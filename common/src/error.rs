//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 個別選択の上限超過（何も追加されない）
    #[error("個別ファイルは最大{max}件までです（選択済み{staged}件 + 追加{incoming}件）")]
    TooManyFiles {
        staged: usize,
        incoming: usize,
        max: usize,
    },

    /// バッチは必ず3ファイル
    #[error("バッチのファイル数が不正です: {0}件（3件必要）")]
    InvalidBatch(usize),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
