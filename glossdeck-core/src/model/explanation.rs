use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TextRange;

/// A vocabulary gloss anchored to a character range of one paragraph.
///
/// The range is flattened on the wire, so an explanation serializes as
/// `{id, startIndex, endIndex, explanation}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Explanation {
    pub id: Uuid,
    #[serde(flatten)]
    pub range: TextRange,
    #[serde(rename = "explanation")]
    pub body: String,
}

impl Explanation {
    pub fn new(range: TextRange, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            range,
            body,
        }
    }
}
