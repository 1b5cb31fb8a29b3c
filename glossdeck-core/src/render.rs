//! Highlight rendering: the single merge pass that turns a paragraph's raw
//! text plus its explanation list into a sequence of plain and highlighted
//! segments, and the HTML form of that sequence used by the exporter.

use crate::model::Explanation;

/// One piece of a rendered paragraph. Concatenating the `content` of every
/// segment reproduces the raw text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text { content: &'a str },
    Highlight {
        content: &'a str,
        explanation: &'a Explanation,
    },
}

impl<'a> Segment<'a> {
    pub fn content(&self) -> &'a str {
        match self {
            Segment::Text { content } => content,
            Segment::Highlight { content, .. } => content,
        }
    }
}

/// Merge a paragraph's explanations into an ordered segment list.
///
/// Explanations with out-of-bounds or inverted ranges are dropped at this
/// boundary even though the store should never produce them. The rest are
/// taken in start order, ties broken longest-first, and any span that
/// begins before the write cursor is skipped outright: only non-overlapping
/// spans in left-to-right, longest-first priority order are rendered.
/// Overlap handling must stay exactly this way; exported documents depend
/// on it.
pub fn segments<'a>(text: &'a str, explanations: &'a [Explanation]) -> Vec<Segment<'a>> {
    // Char offset -> byte offset, with a trailing sentinel for the end.
    let byte_pos: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = byte_pos.len() - 1;
    let slice = |from: usize, to: usize| &text[byte_pos[from]..byte_pos[to]];

    let mut valid: Vec<&Explanation> = explanations
        .iter()
        .filter(|e| e.range.start_index < e.range.end_index && e.range.end_index <= char_len)
        .collect();
    valid.sort_by(|a, b| {
        a.range
            .start_index
            .cmp(&b.range.start_index)
            .then(b.range.end_index.cmp(&a.range.end_index))
    });

    let mut out = Vec::new();
    let mut last_index = 0;
    for explanation in valid {
        let range = explanation.range;
        if range.start_index < last_index {
            continue;
        }
        if range.start_index > last_index {
            out.push(Segment::Text {
                content: slice(last_index, range.start_index),
            });
        }
        out.push(Segment::Highlight {
            content: slice(range.start_index, range.end_index),
            explanation,
        });
        last_index = range.end_index;
    }
    if last_index < char_len {
        out.push(Segment::Text {
            content: slice(last_index, char_len),
        });
    }
    out
}

/// Render a paragraph as export markup: plain runs escaped literally,
/// explained runs wrapped in a span carrying the target text and the
/// explanation body as data attributes.
pub fn to_html(text: &str, explanations: &[Explanation]) -> String {
    let mut html = String::new();
    for segment in segments(text, explanations) {
        match segment {
            Segment::Text { content } => html.push_str(&escape_html(content)),
            Segment::Highlight {
                content,
                explanation,
            } => {
                html.push_str(&format!(
                    "<span class=\"highlighted-text\" data-target=\"{}\" data-explanation=\"{}\">{}</span>",
                    escape_html(content),
                    escape_html(&explanation.body),
                    escape_html(content),
                ));
            }
        }
    }
    html
}

/// Escape the five HTML-significant characters. Applied to every text
/// segment and every attribute value that reaches markup; nothing else may
/// insert untrusted content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRange;

    fn explanation(start: usize, end: usize, body: &str) -> Explanation {
        Explanation::new(TextRange::new(start, end), body.to_string())
    }

    fn visible(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.content()).collect()
    }

    #[test]
    fn plain_text_is_one_segment() {
        let segs = segments("no glosses here", &[]);
        assert_eq!(segs.len(), 1);
        assert_eq!(visible(&segs), "no glosses here");
    }

    #[test]
    fn content_is_preserved_around_highlights() {
        let text = "Photosynthesis is vital.";
        let exps = vec![explanation(0, 14, "process of...")];
        let segs = segments(text, &exps);

        assert_eq!(visible(&segs), text);
        assert!(matches!(
            segs[0],
            Segment::Highlight {
                content: "Photosynthesis",
                ..
            }
        ));
        assert!(matches!(segs[1], Segment::Text { content: " is vital." }));
    }

    #[test]
    fn highlight_wraps_only_the_explained_word() {
        let text = "Photosynthesis is vital.";
        let exps = vec![explanation(0, 14, "process of...")];
        assert_eq!(
            to_html(text, &exps),
            "<span class=\"highlighted-text\" data-target=\"Photosynthesis\" \
             data-explanation=\"process of...\">Photosynthesis</span> is vital."
        );
    }

    #[test]
    fn later_overlapping_span_is_skipped() {
        let text = "abcdefghij";
        let exps = vec![explanation(0, 5, "first"), explanation(2, 8, "second")];
        let segs = segments(text, &exps);

        // {0,5} wins; {2,8} starts before the cursor and is dropped.
        assert_eq!(segs.len(), 2);
        assert!(matches!(
            segs[0],
            Segment::Highlight {
                content: "abcde",
                ..
            }
        ));
        assert_eq!(visible(&segs), text);
    }

    #[test]
    fn same_start_prefers_the_longer_span() {
        let text = "abcdefghij";
        let exps = vec![explanation(0, 3, "short"), explanation(0, 8, "long")];
        let segs = segments(text, &exps);

        assert!(matches!(
            segs[0],
            Segment::Highlight {
                content: "abcdefgh",
                ..
            }
        ));
        assert_eq!(visible(&segs), text);
    }

    #[test]
    fn nested_span_is_skipped() {
        let text = "abcdefghij";
        let exps = vec![explanation(0, 8, "outer"), explanation(2, 5, "inner")];
        let segs = segments(text, &exps);

        assert_eq!(segs.len(), 2);
        assert!(matches!(
            segs[0],
            Segment::Highlight {
                content: "abcdefgh",
                ..
            }
        ));
    }

    #[test]
    fn out_of_bounds_ranges_are_dropped() {
        let text = "short";
        let exps = vec![explanation(0, 99, "bad"), explanation(1, 3, "ok")];
        let segs = segments(text, &exps);

        assert_eq!(visible(&segs), text);
        assert!(matches!(segs[1], Segment::Highlight { content: "ho", .. }));
    }

    #[test]
    fn escapes_all_five_significant_characters() {
        assert_eq!(
            escape_html(r#"a & b < c > d " e ' f"#),
            "a &amp; b &lt; c &gt; d &quot; e &#039; f"
        );
    }

    #[test]
    fn adversarial_text_never_reaches_markup_unescaped() {
        let text = r#"<script>alert("x")</script> & 'quotes'"#;
        let exps = vec![explanation(0, 8, r#"an <evil> "body""#)];
        let html = to_html(text, &exps);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("data-explanation=\"an &lt;evil&gt; &quot;body&quot;\""));
    }

    #[test]
    fn rendering_is_idempotent() {
        let text = "Photosynthesis is vital.";
        let exps = vec![explanation(0, 14, "process of..."), explanation(18, 23, "very important")];
        assert_eq!(to_html(text, &exps), to_html(text, &exps));
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        // "déjà vu" — 'é' and 'à' are multi-byte.
        let text = "déjà vu";
        let exps = vec![explanation(0, 4, "again")];
        let segs = segments(text, &exps);

        assert!(matches!(
            segs[0],
            Segment::Highlight {
                content: "déjà",
                ..
            }
        ));
        assert!(matches!(segs[1], Segment::Text { content: " vu" }));
    }
}
