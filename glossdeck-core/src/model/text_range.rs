use serde::{Deserialize, Serialize};

/// A range of text addressed by character offsets into a paragraph's raw
/// text. Offsets count Unicode scalar values, not bytes; the end offset is
/// exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start_index: start.min(end),
            end_index: start.max(end),
        }
    }

    /// Check if this range contains the given offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start_index && offset < self.end_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }
}
