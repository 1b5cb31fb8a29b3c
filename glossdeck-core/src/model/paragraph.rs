use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Explanation, TextRange};

/// A paragraph of source text with its anchored explanations.
///
/// The text may be empty while the paragraph is still a draft in the
/// editor; drafts are filtered out of snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: Uuid,
    pub text: String,
    pub explanations: Vec<Explanation>,
}

impl Paragraph {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            explanations: Vec::new(),
        }
    }

    /// An empty draft awaiting its first confirmed text.
    pub fn draft() -> Self {
        Self::new(String::new())
    }

    pub fn is_draft(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Character length of the raw text (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn explanation(&self, id: Uuid) -> Option<&Explanation> {
        self.explanations.iter().find(|e| e.id == id)
    }

    /// Whether some explanation is anchored at exactly this range.
    pub fn has_explanation_at(&self, range: TextRange) -> bool {
        self.explanations.iter().any(|e| e.range == range)
    }

    /// Explanations sorted by start offset
    pub fn explanations_sorted(&self) -> Vec<&Explanation> {
        let mut sorted: Vec<_> = self.explanations.iter().collect();
        sorted.sort_by_key(|e| e.range.start_index);
        sorted
    }
}
