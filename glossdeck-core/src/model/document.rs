use log::warn;
use serde::{Deserialize, Serialize};

use super::{Paragraph, PresentationMeta};

/// The persisted document: metadata plus all non-empty paragraphs with
/// their explanations. This is the sole unit of save/load/export, stored as
/// one JSON value under one well-known key. There is no schema version
/// field; absent fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub meta: PresentationMeta,
    pub paragraphs: Vec<Paragraph>,
}

impl Snapshot {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a stored snapshot. Malformed input degrades to the default
    /// (empty) snapshot rather than failing; the loader seeds a draft
    /// paragraph from that.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("discarding unreadable saved presentation: {err}");
                Snapshot::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut snapshot = Snapshot::default();
        snapshot.meta.title = "Week 3 Reading".to_string();
        snapshot.paragraphs.push(Paragraph::new("Some text".to_string()));

        let json = snapshot.to_json().unwrap();
        let loaded = Snapshot::from_json(&json);

        assert_eq!(loaded.meta.title, "Week 3 Reading");
        assert_eq!(loaded.paragraphs.len(), 1);
        assert_eq!(loaded.paragraphs[0].text, "Some text");
    }

    #[test]
    fn uses_wire_field_names() {
        use crate::model::{Explanation, TextRange};

        let mut paragraph = Paragraph::new("Photosynthesis is vital.".to_string());
        paragraph
            .explanations
            .push(Explanation::new(TextRange::new(0, 14), "process of...".to_string()));
        let snapshot = Snapshot {
            meta: PresentationMeta {
                instructor_name: "A. Shi".to_string(),
                ..Default::default()
            },
            paragraphs: vec![paragraph],
        };

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"instructorName\""));
        assert!(json.contains("\"contactInfo\""));
        assert!(json.contains("\"startIndex\": 0"));
        assert!(json.contains("\"endIndex\": 14"));
        assert!(json.contains("\"explanation\": \"process of...\""));
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let snapshot = Snapshot::from_json("{not json at all");
        assert!(snapshot.paragraphs.is_empty());
        assert_eq!(snapshot.meta, PresentationMeta::default());
    }

    #[test]
    fn absent_fields_default() {
        let snapshot = Snapshot::from_json("{}");
        assert!(snapshot.paragraphs.is_empty());
        assert!(snapshot.meta.title.is_empty());
    }
}
