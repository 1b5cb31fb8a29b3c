//! Platform-agnostic editor state: modes, focus, pending confirmations and
//! every workflow the terminal frontend drives. All mutation runs
//! synchronously inside one key-event handler; a declined confirmation
//! leaves no partial effect.

use uuid::Uuid;

use crate::cursor::CursorState;
use crate::model::{MetaField, Paragraph, Snapshot, TextRange};
use crate::render;
use crate::selection;
use crate::store::AnnotationStore;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Visual,
    Input,
    Confirm,
    Help,
}

/// Focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Meta,
    Paragraphs,
    Explanations,
}

/// What the input buffer is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// Multi-line paragraph text, confirmed as the active paragraph's body
    ParagraphText,
    /// Body for a new explanation (range or target already pending)
    ExplanationBody,
    /// Replacement body for the selected explanation
    ExplanationEdit,
    /// Exact word/phrase/sentence to explain (manual flow)
    TargetText,
    /// One title-slide metadata field
    Meta(MetaField),
}

/// A destructive mutation awaiting the user's yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    ReplaceParagraphText { paragraph: Uuid, new_text: String },
    RemoveParagraph(Uuid),
    RemoveExplanation { paragraph: Uuid, explanation: Uuid },
    ClearAll,
}

impl PendingAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::ReplaceParagraphText { .. } => {
                "Changing the paragraph text will clear all existing explanations for this paragraph. Continue?"
            }
            PendingAction::RemoveParagraph(_) => {
                "Are you sure you want to remove this paragraph and all its explanations?"
            }
            PendingAction::RemoveExplanation { .. } => {
                "Are you sure you want to remove this explanation?"
            }
            PendingAction::ClearAll => {
                "Are you sure you want to clear all data? This cannot be undone."
            }
        }
    }
}

pub struct App {
    pub store: AnnotationStore,
    pub cursor: CursorState,
    pub mode: Mode,
    pub focus: Focus,
    pub running: bool,

    // Pane selections
    pub selected_paragraph: usize,
    pub selected_explanation: usize,
    pub selected_meta: usize,

    // Visual-mode anchor, as a raw char offset in the active paragraph
    pub selection_anchor: Option<usize>,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,

    // Pending state for multi-step workflows
    pub pending_action: Option<PendingAction>,
    pending_range: Option<TextRange>,
    pending_target: Option<String>,
    pending_explanation: Option<Uuid>,

    // Status message
    pub status_message: Option<String>,

    dirty: bool,
    storage_reset: bool,
}

impl App {
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut app = Self {
            store: AnnotationStore::from_snapshot(snapshot),
            cursor: CursorState::new(),
            mode: Mode::Normal,
            focus: Focus::Paragraphs,
            running: true,
            selected_paragraph: 0,
            selected_explanation: 0,
            selected_meta: 0,
            selection_anchor: None,
            input_buffer: String::new(),
            input_target: InputTarget::ParagraphText,
            pending_action: None,
            pending_range: None,
            pending_target: None,
            pending_explanation: None,
            status_message: None,
            dirty: false,
            storage_reset: false,
        };
        app.sync_cursor();
        app
    }

    pub fn active_paragraph(&self) -> Option<&Paragraph> {
        self.store.paragraphs().get(self.selected_paragraph)
    }

    fn active_paragraph_id(&self) -> Option<Uuid> {
        self.active_paragraph().map(|p| p.id)
    }

    /// Selected explanation in sidebar order (sorted by start offset).
    pub fn selected_explanation_id(&self) -> Option<Uuid> {
        let paragraph = self.active_paragraph()?;
        paragraph
            .explanations_sorted()
            .get(self.selected_explanation)
            .map(|e| e.id)
    }

    fn sync_cursor(&mut self) {
        let text = self
            .active_paragraph()
            .map(|p| p.text.clone())
            .unwrap_or_default();
        self.cursor.set_content(&text);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True once per batch of mutations; the host persists when it sees it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Set when the user cleared all data; the host drops the stored key.
    pub fn take_storage_reset(&mut self) -> bool {
        std::mem::take(&mut self.storage_reset)
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // --- Navigation ---

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Meta => Focus::Paragraphs,
            Focus::Paragraphs => Focus::Explanations,
            Focus::Explanations => Focus::Meta,
        };
    }

    pub fn next_paragraph(&mut self) {
        let count = self.store.paragraphs().len();
        if count > 0 {
            self.selected_paragraph = (self.selected_paragraph + 1) % count;
            self.selected_explanation = 0;
            self.sync_cursor();
        }
    }

    pub fn prev_paragraph(&mut self) {
        let count = self.store.paragraphs().len();
        if count > 0 {
            self.selected_paragraph = if self.selected_paragraph == 0 {
                count - 1
            } else {
                self.selected_paragraph - 1
            };
            self.selected_explanation = 0;
            self.sync_cursor();
        }
    }

    pub fn next_explanation(&mut self) {
        let count = self
            .active_paragraph()
            .map(|p| p.explanations.len())
            .unwrap_or(0);
        if count > 0 {
            self.selected_explanation = (self.selected_explanation + 1) % count;
        }
    }

    pub fn prev_explanation(&mut self) {
        let count = self
            .active_paragraph()
            .map(|p| p.explanations.len())
            .unwrap_or(0);
        if count > 0 {
            self.selected_explanation = if self.selected_explanation == 0 {
                count - 1
            } else {
                self.selected_explanation - 1
            };
        }
    }

    pub fn next_meta_field(&mut self) {
        self.selected_meta = (self.selected_meta + 1) % MetaField::all().len();
    }

    pub fn prev_meta_field(&mut self) {
        let len = MetaField::all().len();
        self.selected_meta = if self.selected_meta == 0 {
            len - 1
        } else {
            self.selected_meta - 1
        };
    }

    // --- Paragraph text workflows ---

    /// Add a draft section and open its text input.
    pub fn begin_add_paragraph(&mut self) {
        self.store.add_draft();
        self.selected_paragraph = self.store.paragraphs().len() - 1;
        self.selected_explanation = 0;
        self.sync_cursor();
        self.open_input(InputTarget::ParagraphText, String::new());
    }

    /// Re-open the active paragraph's text for editing.
    pub fn begin_edit_paragraph(&mut self) {
        let Some(paragraph) = self.active_paragraph() else {
            return;
        };
        let text = paragraph.text.clone();
        self.open_input(InputTarget::ParagraphText, text);
    }

    fn open_input(&mut self, target: InputTarget, initial: String) {
        self.input_buffer = initial;
        self.input_target = target;
        self.mode = Mode::Input;
    }

    pub fn begin_edit_meta_field(&mut self) {
        let field = MetaField::all()[self.selected_meta];
        let value = self.store.meta().get(field).to_string();
        self.open_input(InputTarget::Meta(field), value);
    }

    /// Manual explanation entry: prompt for the exact target phrase first.
    pub fn begin_manual_explanation(&mut self) {
        match self.active_paragraph() {
            Some(p) if !p.is_draft() => {
                self.open_input(InputTarget::TargetText, String::new());
            }
            _ => {
                self.set_status("Please confirm the paragraph text first before adding explanations.");
            }
        }
    }

    pub fn begin_edit_explanation(&mut self) {
        let Some(id) = self.selected_explanation_id() else {
            return;
        };
        let body = self
            .active_paragraph()
            .and_then(|p| p.explanation(id))
            .map(|e| e.body.clone())
            .unwrap_or_default();
        self.pending_explanation = Some(id);
        self.open_input(InputTarget::ExplanationEdit, body);
    }

    /// Abort the current input, dropping any pending workflow state.
    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.pending_range = None;
        self.pending_target = None;
        self.pending_explanation = None;
        self.mode = Mode::Normal;
    }

    /// Commit the input buffer to whatever it was collecting.
    pub fn submit_input(&mut self) {
        match self.input_target {
            InputTarget::ParagraphText => self.submit_paragraph_text(),
            InputTarget::TargetText => self.submit_target_text(),
            InputTarget::ExplanationBody => self.submit_explanation_body(),
            InputTarget::ExplanationEdit => self.submit_explanation_edit(),
            InputTarget::Meta(field) => self.submit_meta_field(field),
        }
    }

    fn submit_paragraph_text(&mut self) {
        let new_text = self.input_buffer.trim().to_string();
        if new_text.is_empty() {
            self.set_status("Paragraph text cannot be empty. Please enter some text before confirming.");
            return;
        }
        let Some(paragraph) = self.active_paragraph() else {
            self.cancel_input();
            return;
        };
        let id = paragraph.id;

        if paragraph.text == new_text {
            self.cancel_input();
            return;
        }
        if !paragraph.is_draft() && !paragraph.explanations.is_empty() {
            // Replacing confirmed text costs its explanations; ask first.
            self.input_buffer.clear();
            self.pending_action = Some(PendingAction::ReplaceParagraphText {
                paragraph: id,
                new_text,
            });
            self.mode = Mode::Confirm;
            return;
        }
        self.apply_paragraph_text(id, &new_text);
        self.cancel_input();
    }

    fn apply_paragraph_text(&mut self, id: Uuid, new_text: &str) {
        match self.store.set_paragraph_text(id, new_text) {
            Ok(true) => {
                self.sync_cursor();
                self.mark_dirty();
                self.set_status("Paragraph confirmed");
            }
            Ok(false) => {}
            Err(err) => self.set_status(&err.to_string()),
        }
    }

    fn submit_target_text(&mut self) {
        let target = self.input_buffer.trim().to_string();
        if target.is_empty() {
            self.set_status("Target text cannot be empty");
            self.cancel_input();
            return;
        }
        self.pending_target = Some(target);
        self.input_buffer.clear();
        self.input_target = InputTarget::ExplanationBody;
    }

    fn submit_explanation_body(&mut self) {
        let body = self.input_buffer.trim().to_string();
        if body.is_empty() {
            self.set_status("Explanation cannot be empty");
            self.cancel_input();
            return;
        }
        let Some(paragraph_id) = self.active_paragraph_id() else {
            self.cancel_input();
            return;
        };

        if let Some(range) = self.pending_range.take() {
            if self.store.add_explanation(paragraph_id, range, &body).is_some() {
                self.mark_dirty();
                self.set_status("Explanation added");
            }
        } else if let Some(target) = self.pending_target.take() {
            if self
                .store
                .add_explanation_at_target(paragraph_id, &target, &body)
                .is_some()
            {
                self.mark_dirty();
                self.set_status("Explanation added");
            } else {
                self.set_status(&format!(
                    "\"{target}\" not found in the paragraph, or all occurrences are already explained."
                ));
            }
        }
        self.cancel_input();
    }

    fn submit_explanation_edit(&mut self) {
        let body = self.input_buffer.trim().to_string();
        if body.is_empty() {
            self.set_status("Explanation cannot be empty");
            self.cancel_input();
            return;
        }
        if let (Some(paragraph_id), Some(explanation_id)) =
            (self.active_paragraph_id(), self.pending_explanation.take())
        {
            if self
                .store
                .set_explanation_body(paragraph_id, explanation_id, &body)
            {
                self.mark_dirty();
                self.set_status("Explanation updated");
            }
        }
        self.cancel_input();
    }

    fn submit_meta_field(&mut self, field: MetaField) {
        let value = std::mem::take(&mut self.input_buffer);
        self.store.set_meta_field(field, value);
        self.mark_dirty();
        self.mode = Mode::Normal;
    }

    // --- Selection / explanation workflows ---

    /// Enter visual mode over the active paragraph's rendered preview.
    pub fn enter_visual_mode(&mut self) {
        match self.active_paragraph() {
            Some(p) if !p.is_draft() => {
                self.selection_anchor = Some(self.cursor.offset());
                self.mode = Mode::Visual;
            }
            _ => self.set_status("Confirm the paragraph text before selecting"),
        }
    }

    pub fn exit_visual_mode(&mut self) {
        self.selection_anchor = None;
        if self.mode == Mode::Visual {
            self.mode = Mode::Normal;
        }
    }

    /// The selection as raw offsets, normalized; None while collapsed.
    pub fn selection_range(&self) -> Option<TextRange> {
        let anchor = self.selection_anchor?;
        let paragraph = self.active_paragraph()?;
        // Resolve both endpoints through the rendered segment view, the
        // same way a selection over highlighted markup comes back.
        let segments = render::segments(&paragraph.text, &paragraph.explanations);
        selection::selection_range(
            &segments,
            selection::position_of(&segments, anchor),
            selection::position_of(&segments, self.cursor.offset()),
        )
    }

    /// Accept the visual selection and prompt for the explanation body.
    pub fn start_annotation(&mut self) {
        let Some(range) = self.selection_range() else {
            self.set_status("Nothing selected");
            return;
        };
        self.exit_visual_mode();
        self.pending_range = Some(range);
        self.open_input(InputTarget::ExplanationBody, String::new());
    }

    // --- Destructive actions behind confirmation ---

    pub fn request_remove_explanation(&mut self) {
        if let (Some(paragraph), Some(explanation)) =
            (self.active_paragraph_id(), self.selected_explanation_id())
        {
            self.pending_action = Some(PendingAction::RemoveExplanation {
                paragraph,
                explanation,
            });
            self.mode = Mode::Confirm;
        }
    }

    pub fn request_remove_paragraph(&mut self) {
        if let Some(id) = self.active_paragraph_id() {
            self.pending_action = Some(PendingAction::RemoveParagraph(id));
            self.mode = Mode::Confirm;
        }
    }

    pub fn request_clear_all(&mut self) {
        self.pending_action = Some(PendingAction::ClearAll);
        self.mode = Mode::Confirm;
    }

    /// Resolve the pending confirmation. Declining leaves every piece of
    /// state exactly as it was.
    pub fn confirm_pending(&mut self, accept: bool) {
        self.mode = Mode::Normal;
        let Some(action) = self.pending_action.take() else {
            return;
        };
        if !accept {
            return;
        }
        match action {
            PendingAction::ReplaceParagraphText { paragraph, new_text } => {
                self.apply_paragraph_text(paragraph, &new_text);
            }
            PendingAction::RemoveParagraph(id) => {
                if self.store.remove_paragraph(id) {
                    let count = self.store.paragraphs().len();
                    if self.selected_paragraph >= count && count > 0 {
                        self.selected_paragraph = count - 1;
                    }
                    self.selected_explanation = 0;
                    self.sync_cursor();
                    self.mark_dirty();
                    self.set_status("Paragraph removed");
                }
            }
            PendingAction::RemoveExplanation {
                paragraph,
                explanation,
            } => {
                if self.store.remove_explanation(paragraph, explanation) {
                    let count = self
                        .active_paragraph()
                        .map(|p| p.explanations.len())
                        .unwrap_or(0);
                    if self.selected_explanation >= count && count > 0 {
                        self.selected_explanation = count - 1;
                    }
                    self.mark_dirty();
                    self.set_status("Explanation removed");
                }
            }
            PendingAction::ClearAll => {
                self.store.clear();
                self.selected_paragraph = 0;
                self.selected_explanation = 0;
                self.selected_meta = 0;
                self.sync_cursor();
                self.storage_reset = true;
                self.mark_dirty();
                self.set_status("All data cleared!");
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, PresentationMeta};
    use crate::render::to_html;

    fn app_with(text: &str) -> App {
        App::from_snapshot(Snapshot {
            meta: PresentationMeta::default(),
            paragraphs: vec![Paragraph::new(text.to_string())],
        })
    }

    #[test]
    fn selection_to_rendered_highlight_end_to_end() {
        let mut app = app_with("Photosynthesis is vital.");

        app.enter_visual_mode();
        assert_eq!(app.mode, Mode::Visual);
        app.cursor.set_offset(14);

        app.start_annotation();
        assert_eq!(app.mode, Mode::Input);
        assert_eq!(app.input_target, InputTarget::ExplanationBody);

        app.input_buffer = "process of...".to_string();
        app.submit_input();

        let paragraph = app.active_paragraph().unwrap();
        assert_eq!(paragraph.explanations.len(), 1);
        assert_eq!(paragraph.explanations[0].range, TextRange::new(0, 14));
        assert_eq!(
            to_html(&paragraph.text, &paragraph.explanations),
            "<span class=\"highlighted-text\" data-target=\"Photosynthesis\" \
             data-explanation=\"process of...\">Photosynthesis</span> is vital."
        );
        assert!(app.take_dirty());
    }

    #[test]
    fn collapsed_selection_does_not_annotate() {
        let mut app = app_with("some text");
        app.enter_visual_mode();
        app.start_annotation();

        assert_eq!(app.mode, Mode::Visual);
        assert_eq!(app.status_message.as_deref(), Some("Nothing selected"));
    }

    #[test]
    fn empty_explanation_body_is_rejected_with_a_notice() {
        let mut app = app_with("some text");
        app.enter_visual_mode();
        app.cursor.set_offset(4);
        app.start_annotation();
        app.input_buffer = "   ".to_string();
        app.submit_input();

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.active_paragraph().unwrap().explanations.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Explanation cannot be empty"));
        assert!(!app.take_dirty());
    }

    #[test]
    fn selecting_inside_an_existing_highlight_still_yields_raw_offsets() {
        let mut app = app_with("Photosynthesis is vital.");
        app.store
            .add_explanation(
                app.active_paragraph().unwrap().id,
                TextRange::new(0, 14),
                "gloss",
            )
            .unwrap();

        app.cursor.set_offset(5);
        app.enter_visual_mode();
        app.cursor.set_offset(17);
        assert_eq!(app.selection_range(), Some(TextRange::new(5, 17)));
    }

    #[test]
    fn replacing_confirmed_text_asks_and_clears_on_accept() {
        let mut app = app_with("Photosynthesis is vital.");
        let id = app.active_paragraph().unwrap().id;
        app.store
            .add_explanation(id, TextRange::new(0, 14), "gloss")
            .unwrap();

        app.begin_edit_paragraph();
        app.input_buffer = "Entirely new text.".to_string();
        app.submit_input();
        assert_eq!(app.mode, Mode::Confirm);

        app.confirm_pending(true);
        let paragraph = app.active_paragraph().unwrap();
        assert_eq!(paragraph.text, "Entirely new text.");
        assert!(paragraph.explanations.is_empty());
    }

    #[test]
    fn declining_a_text_change_leaves_everything_untouched() {
        let mut app = app_with("Photosynthesis is vital.");
        let id = app.active_paragraph().unwrap().id;
        app.store
            .add_explanation(id, TextRange::new(0, 14), "gloss")
            .unwrap();
        app.take_dirty();

        app.begin_edit_paragraph();
        app.input_buffer = "Entirely new text.".to_string();
        app.submit_input();
        app.confirm_pending(false);

        let paragraph = app.active_paragraph().unwrap();
        assert_eq!(paragraph.text, "Photosynthesis is vital.");
        assert_eq!(paragraph.explanations.len(), 1);
        assert!(!app.take_dirty());
    }

    #[test]
    fn first_draft_confirmation_skips_the_dialog() {
        let mut app = App::new();
        app.begin_edit_paragraph();
        app.input_buffer = "Fresh paragraph text".to_string();
        app.submit_input();

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.active_paragraph().unwrap().text, "Fresh paragraph text");
    }

    #[test]
    fn empty_paragraph_text_keeps_the_input_open() {
        let mut app = App::new();
        app.begin_edit_paragraph();
        app.input_buffer = "   ".to_string();
        app.submit_input();

        assert_eq!(app.mode, Mode::Input);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Paragraph text cannot be empty"));
    }

    #[test]
    fn manual_flow_adds_at_first_unexplained_occurrence() {
        let mut app = app_with("the cat saw the cat");

        app.begin_manual_explanation();
        assert_eq!(app.input_target, InputTarget::TargetText);
        app.input_buffer = "cat".to_string();
        app.submit_input();
        assert_eq!(app.input_target, InputTarget::ExplanationBody);
        app.input_buffer = "small feline".to_string();
        app.submit_input();

        let paragraph = app.active_paragraph().unwrap();
        assert_eq!(paragraph.explanations.len(), 1);
        assert_eq!(paragraph.explanations[0].range, TextRange::new(4, 7));
    }

    #[test]
    fn manual_flow_reports_unmatched_targets() {
        let mut app = app_with("no such words here");

        app.begin_manual_explanation();
        app.input_buffer = "missing".to_string();
        app.submit_input();
        app.input_buffer = "a gloss".to_string();
        app.submit_input();

        assert!(app.active_paragraph().unwrap().explanations.is_empty());
        assert!(app.status_message.as_deref().unwrap().contains("missing"));
    }

    #[test]
    fn manual_flow_requires_confirmed_text() {
        let mut app = App::new();
        app.begin_manual_explanation();

        assert_eq!(app.mode, Mode::Normal);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .contains("confirm the paragraph text"));
    }

    #[test]
    fn explanation_edit_and_removal() {
        let mut app = app_with("some text here");
        let id = app.active_paragraph().unwrap().id;
        app.store
            .add_explanation(id, TextRange::new(0, 4), "draft gloss")
            .unwrap();

        app.focus = Focus::Explanations;
        app.begin_edit_explanation();
        app.input_buffer = "final gloss".to_string();
        app.submit_input();
        assert_eq!(
            app.active_paragraph().unwrap().explanations[0].body,
            "final gloss"
        );

        app.request_remove_explanation();
        assert_eq!(app.mode, Mode::Confirm);
        app.confirm_pending(true);
        assert!(app.active_paragraph().unwrap().explanations.is_empty());
    }

    #[test]
    fn clear_all_resets_and_requests_storage_removal() {
        let mut app = app_with("some text");
        app.store
            .set_meta_field(MetaField::Title, "Deck".to_string());

        app.request_clear_all();
        app.confirm_pending(true);

        assert_eq!(app.store.meta(), &PresentationMeta::default());
        assert_eq!(app.store.paragraphs().len(), 1);
        assert!(app.store.paragraphs()[0].is_draft());
        assert!(app.take_storage_reset());
        assert!(app.take_dirty());
    }

    #[test]
    fn meta_field_edits_round_trip() {
        let mut app = App::new();
        app.focus = Focus::Meta;
        app.begin_edit_meta_field();
        app.input_buffer = "Week 3 Reading".to_string();
        app.submit_input();

        assert_eq!(app.store.meta().title, "Week 3 Reading");
    }
}
