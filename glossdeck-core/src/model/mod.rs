pub mod document;
pub mod explanation;
pub mod meta;
pub mod paragraph;
pub mod text_range;

pub use document::Snapshot;
pub use explanation::Explanation;
pub use meta::{MetaField, PresentationMeta};
pub use paragraph::Paragraph;
pub use text_range::TextRange;
