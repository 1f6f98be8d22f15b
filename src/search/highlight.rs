//! Merging matched positions into renderable spans.

use std::ops::Range;

/// Collapses ascending character positions into closed-open ranges.
///
/// Adjacent indices merge into a single span; a gap starts a new one. The
/// input must be ascending, which the matcher's left-to-right scan
/// guarantees. Renderers emphasize the returned ranges when drawing the
/// matched field's text.
pub fn highlight_spans(positions: &[usize]) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = Vec::new();
    for &position in positions {
        match spans.last_mut() {
            Some(span) if span.end == position => span.end = position + 1,
            _ => spans.push(position..position + 1),
        }
    }
    spans
}
