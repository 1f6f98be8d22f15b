//! Greedy subsequence scoring of a single candidate string.

/// Outcome of matching one candidate against a query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Raw score divided by the candidate's character count.
    pub score: f32,
    /// Character indices of the matched query characters, ascending.
    pub positions: Vec<usize>,
}

/// Scores `query` as an ordered subsequence of `text`.
///
/// Walks `text` once, left to right, consuming query characters greedily: the
/// first occurrence of the sought character always wins, so the cost is
/// O(text) and the alignment is not necessarily the highest-scoring one. Each
/// matched character contributes `1 + 2 * run`, where `run` counts the
/// immediately preceding consecutive matches, plus a flat `+2` when the match
/// starts the text or follows a space. A mismatch resets the run without
/// advancing the query cursor. Returns `None` when the query characters do
/// not all occur in order.
///
/// Indices in the outcome are character positions, not byte offsets.
pub fn fuzzy_match(text: &str, query: &str) -> Option<MatchOutcome> {
    let query: Vec<char> = query.chars().collect();
    let text_len = text.chars().count();

    if query.is_empty() {
        return Some(MatchOutcome {
            score: 0.0,
            positions: Vec::new(),
        });
    }
    if text_len == 0 {
        return None;
    }

    let mut score = 0.0_f32;
    let mut run = 0_u32;
    let mut cursor = 0_usize;
    let mut positions = Vec::with_capacity(query.len());
    let mut prev: Option<char> = None;

    for (i, ch) in text.chars().enumerate() {
        if ch == query[cursor] {
            positions.push(i);
            score += 1.0 + 2.0 * run as f32;
            if i == 0 || prev == Some(' ') {
                score += 2.0;
            }
            run += 1;
            cursor += 1;
            if cursor == query.len() {
                break;
            }
        } else {
            run = 0;
        }
        prev = Some(ch);
    }

    if cursor < query.len() {
        return None;
    }
    Some(MatchOutcome {
        score: score / text_len as f32,
        positions,
    })
}
