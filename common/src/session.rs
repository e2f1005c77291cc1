//! セッション状態（結果ログ）
//!
//! 結果は追記のみ。値として受け渡し、各ステージが更新後の値を返す

use crate::aggregator::{ConfusionMatrix, Summary};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    outcomes: Vec<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 結果を1件追記した新しい状態を返す
    #[must_use]
    pub fn record(mut self, outcome: Outcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// ログ全体から混同行列を作り直す
    pub fn confusion_matrix(&self) -> ConfusionMatrix {
        ConfusionMatrix::from_outcomes(&self.outcomes)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_outcomes(&self.outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Batch, Predicted, SubmitMode, UploadedFile};

    fn batch(sample: &str) -> Batch {
        Batch::new(vec![
            UploadedFile::new("blanc.png", vec![]),
            UploadedFile::new("written.png", vec![]),
            UploadedFile::new(sample, vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_record_appends_in_order() {
        let session = Session::new()
            .record(Outcome::uploaded(&batch("C01.png"), SubmitMode::Folder, 0, Predicted::Correct))
            .record(Outcome::failed(&batch("F02.png"), SubmitMode::Folder, 1, "HTTP 500"));

        assert_eq!(session.len(), 2);
        assert_eq!(session.outcomes()[0].sample_id, "C01");
        assert_eq!(session.outcomes()[1].sample_id, "F02");
    }

    #[test]
    fn test_failed_outcome_in_log_not_in_matrix() {
        let session = Session::new()
            .record(Outcome::failed(&batch("C01.png"), SubmitMode::Folder, 0, "HTTP 500"));

        assert_eq!(session.len(), 1);
        assert_eq!(session.confusion_matrix().total(), 0);
        assert_eq!(session.summary().failed, 1);
    }

    #[test]
    fn test_session_serialize() {
        let session = Session::new()
            .record(Outcome::uploaded(&batch("F9.png"), SubmitMode::Selection, 0, Predicted::Faulty));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"outcomes\""));
        assert!(json.contains("\"mode\":\"selection\""));
    }
}
