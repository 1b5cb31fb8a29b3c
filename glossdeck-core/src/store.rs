//! The in-memory presentation state: metadata plus the ordered paragraph
//! list, with every mutation the editor performs. One instance is
//! constructed per session and passed around explicitly.

use anyhow::{bail, Result};
use uuid::Uuid;

use crate::model::{Explanation, MetaField, Paragraph, PresentationMeta, Snapshot, TextRange};

#[derive(Debug, Clone)]
pub struct AnnotationStore {
    meta: PresentationMeta,
    paragraphs: Vec<Paragraph>,
}

impl AnnotationStore {
    /// A fresh store with a single empty draft paragraph, the same state a
    /// first-time user sees.
    pub fn new() -> Self {
        Self {
            meta: PresentationMeta::default(),
            paragraphs: vec![Paragraph::draft()],
        }
    }

    /// Load saved state. An empty paragraph list seeds one default draft.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut paragraphs = snapshot.paragraphs;
        if paragraphs.is_empty() {
            paragraphs.push(Paragraph::draft());
        }
        Self {
            meta: snapshot.meta,
            paragraphs,
        }
    }

    pub fn meta(&self) -> &PresentationMeta {
        &self.meta
    }

    pub fn set_meta_field(&mut self, field: MetaField, value: String) {
        self.meta.set(field, value);
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, id: Uuid) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|p| p.id == id)
    }

    fn paragraph_mut(&mut self, id: Uuid) -> Option<&mut Paragraph> {
        self.paragraphs.iter_mut().find(|p| p.id == id)
    }

    /// Append a confirmed paragraph. Empty-trimmed text is rejected with no
    /// state change.
    pub fn add_paragraph(&mut self, text: &str) -> Result<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Paragraph text cannot be empty");
        }
        let paragraph = Paragraph::new(text.to_string());
        let id = paragraph.id;
        self.paragraphs.push(paragraph);
        Ok(id)
    }

    /// Append an empty draft for the editor to fill in.
    pub fn add_draft(&mut self) -> Uuid {
        let paragraph = Paragraph::draft();
        let id = paragraph.id;
        self.paragraphs.push(paragraph);
        id
    }

    /// Replace a paragraph's text. A changed text discards every
    /// explanation anchored to it: offsets are not re-anchored across
    /// edits. The caller is responsible for confirming the loss with the
    /// user first. Unknown ids are a no-op (`Ok(false)`).
    pub fn set_paragraph_text(&mut self, id: Uuid, new_text: &str) -> Result<bool> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            bail!("Paragraph text cannot be empty");
        }
        let Some(paragraph) = self.paragraph_mut(id) else {
            return Ok(false);
        };
        if paragraph.text != new_text {
            paragraph.explanations.clear();
            paragraph.text = new_text.to_string();
        }
        Ok(true)
    }

    /// Anchor a new explanation. Silent no-op when the paragraph is
    /// unknown, the body is empty, or the range does not fit the current
    /// text. Overlapping and duplicate ranges are allowed here; the
    /// renderer decides what wins.
    pub fn add_explanation(&mut self, paragraph_id: Uuid, range: TextRange, body: &str) -> Option<Uuid> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        let Some(paragraph) = self.paragraph_mut(paragraph_id) else {
            return None;
        };
        if range.is_empty() || range.end_index > paragraph.char_len() {
            return None;
        }
        let explanation = Explanation::new(range, body.to_string());
        let id = explanation.id;
        paragraph.explanations.push(explanation);
        Some(id)
    }

    /// Anchor an explanation to the first occurrence of `target` that is
    /// not already explained at exactly that range, scanning left to
    /// right. None when the target does not occur or every occurrence is
    /// taken.
    pub fn add_explanation_at_target(
        &mut self,
        paragraph_id: Uuid,
        target: &str,
        body: &str,
    ) -> Option<Uuid> {
        if target.is_empty() {
            return None;
        }
        let range = {
            let paragraph = self.paragraph(paragraph_id)?;
            let text = &paragraph.text;
            let target_chars = target.chars().count();
            let mut found = None;
            let mut search_from = 0;
            while let Some(rel) = text[search_from..].find(target) {
                let at = search_from + rel;
                let start = text[..at].chars().count();
                let candidate = TextRange::new(start, start + target_chars);
                if !paragraph.has_explanation_at(candidate) {
                    found = Some(candidate);
                    break;
                }
                search_from = at + target.len();
            }
            found?
        };
        self.add_explanation(paragraph_id, range, body)
    }

    /// Edit an explanation's body in place. No-op on unknown ids or an
    /// empty replacement.
    pub fn set_explanation_body(&mut self, paragraph_id: Uuid, explanation_id: Uuid, body: &str) -> bool {
        let body = body.trim();
        if body.is_empty() {
            return false;
        }
        if let Some(paragraph) = self.paragraph_mut(paragraph_id) {
            if let Some(explanation) = paragraph
                .explanations
                .iter_mut()
                .find(|e| e.id == explanation_id)
            {
                explanation.body = body.to_string();
                return true;
            }
        }
        false
    }

    pub fn remove_explanation(&mut self, paragraph_id: Uuid, explanation_id: Uuid) -> bool {
        if let Some(paragraph) = self.paragraph_mut(paragraph_id) {
            if let Some(pos) = paragraph
                .explanations
                .iter()
                .position(|e| e.id == explanation_id)
            {
                paragraph.explanations.remove(pos);
                return true;
            }
        }
        false
    }

    /// Remove a paragraph and all its explanations together.
    pub fn remove_paragraph(&mut self, id: Uuid) -> bool {
        let before = self.paragraphs.len();
        self.paragraphs.retain(|p| p.id != id);
        self.paragraphs.len() != before
    }

    /// Reset to the first-run state: empty metadata, one empty draft.
    pub fn clear(&mut self) {
        self.meta = PresentationMeta::default();
        self.paragraphs = vec![Paragraph::draft()];
    }

    /// The single serialization boundary. Drafts (empty-trimmed text) are
    /// left out.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            meta: self.meta.clone(),
            paragraphs: self
                .paragraphs
                .iter()
                .filter(|p| !p.is_draft())
                .cloned()
                .collect(),
        }
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(text: &str) -> (AnnotationStore, Uuid) {
        let mut store = AnnotationStore::new();
        let id = store.add_paragraph(text).unwrap();
        (store, id)
    }

    #[test]
    fn new_store_seeds_one_draft() {
        let store = AnnotationStore::new();
        assert_eq!(store.paragraphs().len(), 1);
        assert!(store.paragraphs()[0].is_draft());
    }

    #[test]
    fn empty_paragraph_text_is_rejected() {
        let mut store = AnnotationStore::new();
        assert!(store.add_paragraph("   \n ").is_err());
        assert_eq!(store.paragraphs().len(), 1);
    }

    #[test]
    fn changed_text_clears_explanations() {
        let (mut store, id) = store_with("Photosynthesis is vital.");
        store.add_explanation(id, TextRange::new(0, 14), "process of...");
        store.add_explanation(id, TextRange::new(18, 23), "important");
        assert_eq!(store.paragraph(id).unwrap().explanations.len(), 2);

        assert!(store.set_paragraph_text(id, "Entirely new text.").unwrap());
        let paragraph = store.paragraph(id).unwrap();
        assert_eq!(paragraph.text, "Entirely new text.");
        assert!(paragraph.explanations.is_empty());
    }

    #[test]
    fn unchanged_text_keeps_explanations() {
        let (mut store, id) = store_with("Photosynthesis is vital.");
        store.add_explanation(id, TextRange::new(0, 14), "process of...");

        assert!(store
            .set_paragraph_text(id, "Photosynthesis is vital.")
            .unwrap());
        assert_eq!(store.paragraph(id).unwrap().explanations.len(), 1);
    }

    #[test]
    fn set_text_on_unknown_paragraph_is_a_noop() {
        let mut store = AnnotationStore::new();
        assert!(!store.set_paragraph_text(Uuid::new_v4(), "text").unwrap());
    }

    #[test]
    fn add_explanation_rejects_bad_input_silently() {
        let (mut store, id) = store_with("short text");

        assert!(store.add_explanation(Uuid::new_v4(), TextRange::new(0, 3), "x").is_none());
        assert!(store.add_explanation(id, TextRange::new(0, 3), "   ").is_none());
        assert!(store.add_explanation(id, TextRange::new(3, 3), "x").is_none());
        assert!(store.add_explanation(id, TextRange::new(0, 99), "x").is_none());
        assert!(store.paragraph(id).unwrap().explanations.is_empty());
    }

    #[test]
    fn overlapping_ranges_are_permitted_in_the_store() {
        let (mut store, id) = store_with("abcdefghij");
        assert!(store.add_explanation(id, TextRange::new(0, 5), "a").is_some());
        assert!(store.add_explanation(id, TextRange::new(2, 8), "b").is_some());
        assert_eq!(store.paragraph(id).unwrap().explanations.len(), 2);
    }

    #[test]
    fn target_search_finds_first_unexplained_occurrence() {
        let (mut store, id) = store_with("the cat saw the cat");

        let first = store.add_explanation_at_target(id, "cat", "a cat").unwrap();
        let paragraph = store.paragraph(id).unwrap();
        assert_eq!(paragraph.explanation(first).unwrap().range, TextRange::new(4, 7));

        // Second call lands on the second occurrence.
        let second = store.add_explanation_at_target(id, "cat", "again").unwrap();
        let paragraph = store.paragraph(id).unwrap();
        assert_eq!(paragraph.explanation(second).unwrap().range, TextRange::new(16, 19));

        // All occurrences taken now.
        assert!(store.add_explanation_at_target(id, "cat", "third").is_none());
        assert!(store.add_explanation_at_target(id, "dog", "none").is_none());
    }

    #[test]
    fn explanation_body_edits_in_place() {
        let (mut store, id) = store_with("some text here");
        let eid = store
            .add_explanation(id, TextRange::new(0, 4), "first draft")
            .unwrap();

        assert!(store.set_explanation_body(id, eid, "  revised  "));
        assert_eq!(store.paragraph(id).unwrap().explanation(eid).unwrap().body, "revised");

        assert!(!store.set_explanation_body(id, eid, "   "));
        assert!(!store.set_explanation_body(id, Uuid::new_v4(), "x"));
    }

    #[test]
    fn remove_operations_are_noops_when_absent() {
        let (mut store, id) = store_with("some text");
        assert!(!store.remove_explanation(id, Uuid::new_v4()));
        assert!(!store.remove_paragraph(Uuid::new_v4()));
        assert_eq!(store.paragraphs().len(), 2);
    }

    #[test]
    fn remove_paragraph_takes_its_explanations_with_it() {
        let (mut store, id) = store_with("some text");
        store.add_explanation(id, TextRange::new(0, 4), "x");

        assert!(store.remove_paragraph(id));
        assert!(store.paragraph(id).is_none());
    }

    #[test]
    fn snapshot_filters_drafts() {
        let (mut store, _) = store_with("kept paragraph");
        store.add_draft();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.paragraphs.len(), 1);
        assert_eq!(snapshot.paragraphs[0].text, "kept paragraph");
    }

    #[test]
    fn empty_snapshot_loads_a_default_draft() {
        let store = AnnotationStore::from_snapshot(Snapshot::default());
        assert_eq!(store.paragraphs().len(), 1);
        assert!(store.paragraphs()[0].is_draft());
    }

    #[test]
    fn clear_resets_everything() {
        let (mut store, id) = store_with("some text");
        store.set_meta_field(MetaField::Title, "My Deck".to_string());
        store.add_explanation(id, TextRange::new(0, 4), "x");

        store.clear();
        assert_eq!(store.meta(), &PresentationMeta::default());
        assert_eq!(store.paragraphs().len(), 1);
        assert!(store.paragraphs()[0].is_draft());
    }
}
