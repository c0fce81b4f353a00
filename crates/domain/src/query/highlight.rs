use super::SearchQuery;

/// Piece of a rendered cell, marked when it matched a search token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `text` into matched and unmatched runs for every query token.
/// Overlapping or adjacent matches merge into one segment.
pub fn highlight<'a>(text: &'a str, query: &SearchQuery) -> Vec<Segment<'a>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut marked = vec![false; chars.len()];

    for token in query.tokens() {
        let token: Vec<char> = token.chars().collect();
        if token.is_empty() {
            continue;
        }
        for start in 0..chars.len() {
            if let Some(len) = match_len(&chars[start..], &token) {
                marked[start..start + len].iter_mut().for_each(|m| *m = true);
            }
        }
    }

    let mut segments = Vec::new();
    let mut run_start = 0;
    for i in 1..=chars.len() {
        if i == chars.len() || marked[i] != marked[run_start] {
            let from = chars[run_start].0;
            let to = chars.get(i).map_or(text.len(), |(offset, _)| *offset);
            segments.push(Segment {
                text: &text[from..to],
                matched: marked[run_start],
            });
            run_start = i;
        }
    }
    segments
}

/// Number of chars of `chars` consumed by a case-insensitive match of `token`
fn match_len(chars: &[(usize, char)], token: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut consumed = 0;
    for &(_, c) in chars {
        if matched == token.len() {
            break;
        }
        for lower in c.to_lowercase() {
            if token.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        consumed += 1;
    }
    (matched == token.len()).then_some(consumed)
}
