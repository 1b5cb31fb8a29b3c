//! Resolving selections made against a rendered paragraph view.
//!
//! The preview shows a paragraph as the renderer's segment list, so a
//! selection endpoint comes back as "this segment, this many visible
//! characters in" — either endpoint may sit inside an existing highlight.
//! Mapping that to an offset into the raw text means counting visible
//! characters from the start of the view, never markup positions.

use crate::model::TextRange;
use crate::render::Segment;

/// A selection endpoint within a rendered segment list: a segment index
/// and a character offset into that segment's visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPosition {
    pub segment: usize,
    pub offset: usize,
}

impl SegmentPosition {
    pub fn new(segment: usize, offset: usize) -> Self {
        Self { segment, offset }
    }
}

/// Count of visible characters in every segment before `pos`, plus the
/// offset within its segment: the raw-text character offset the position
/// corresponds to. Positions past the end clamp to the text length.
pub fn offset_of(segments: &[Segment], pos: SegmentPosition) -> usize {
    let mut offset = 0;
    for (i, segment) in segments.iter().enumerate() {
        let len = segment.content().chars().count();
        if i == pos.segment {
            return offset + pos.offset.min(len);
        }
        offset += len;
    }
    offset
}

/// The rendered position of a raw-text character offset. Inverse of
/// [`offset_of`]; an offset on a segment boundary resolves to the start of
/// the later segment.
pub fn position_of(segments: &[Segment], offset: usize) -> SegmentPosition {
    let mut remaining = offset;
    for (i, segment) in segments.iter().enumerate() {
        let len = segment.content().chars().count();
        if remaining < len || i + 1 == segments.len() {
            return SegmentPosition::new(i, remaining.min(len));
        }
        remaining -= len;
    }
    SegmentPosition::new(0, 0)
}

/// Resolve a selection's two endpoints to a normalized range over the raw
/// text. Returns None for a collapsed selection.
pub fn selection_range(
    segments: &[Segment],
    anchor: SegmentPosition,
    focus: SegmentPosition,
) -> Option<TextRange> {
    let a = offset_of(segments, anchor);
    let b = offset_of(segments, focus);
    if a == b {
        return None;
    }
    Some(TextRange::new(a, b))
}
