//! glossdeck core - presentation annotation library
//!
//! This crate provides the data structures and logic for glossdeck, an
//! editor that anchors vocabulary explanations to character ranges of
//! paragraphs and exports the result as a standalone HTML slideshow. It
//! has no terminal or filesystem dependencies of its own; hosts supply
//! storage and drive the [`app::App`] state machine.

pub mod app;
pub mod cursor;
pub mod export;
pub mod model;
pub mod render;
pub mod selection;
pub mod storage;
pub mod store;

pub use app::{App, Focus, InputTarget, Mode, PendingAction};
pub use cursor::CursorState;
pub use model::{Explanation, MetaField, Paragraph, PresentationMeta, Snapshot, TextRange};
pub use storage::{MemoryStorage, SnapshotStorage, STORAGE_KEY};
pub use store::AnnotationStore;
