//! Matching of request paths against page patterns.
//!
//! # Design Decisions
//! - Literal segments compare exact text (case-sensitive, no normalization)
//! - A parameter consumes exactly one non-empty segment
//! - A catch-all consumes one or more remaining segments
//! - No regex: a single left-to-right pass per pattern

use crate::routing::pattern::PatternSegment;

/// Split a decoded request path into segments.
///
/// `/` yields no segments; one trailing slash is ignored so `/post/` and
/// `/post` are the same page.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// Try to match `segments` against `pattern`, returning captured parameters.
pub fn match_segments(
    pattern: &[PatternSegment],
    segments: &[&str],
) -> Option<Vec<(String, String)>> {
    let mut params = Vec::new();

    for (i, expected) in pattern.iter().enumerate() {
        match expected {
            PatternSegment::Literal(text) => {
                if segments.get(i) != Some(&text.as_str()) {
                    return None;
                }
            }
            PatternSegment::Parameter(name) => {
                let value = segments.get(i).filter(|s| !s.is_empty())?;
                params.push((name.clone(), value.to_string()));
            }
            PatternSegment::CatchAll(name) => {
                let rest = segments.get(i..).filter(|rest| !rest.is_empty())?;
                params.push((name.clone(), rest.join("/")));
                return Some(params);
            }
        }
    }

    (segments.len() == pattern.len()).then_some(params)
}

/// Precedence key: compare lexicographically, smaller wins.
///
/// At the first position where two patterns differ in kind, a literal beats a
/// parameter, which beats a catch-all.
pub fn precedence(pattern: &[PatternSegment]) -> Vec<u8> {
    pattern.iter().map(PatternSegment::rank).collect()
}
