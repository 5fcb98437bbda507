//! Route patterns and lexical segment classification.
//!
//! File names map to segments purely lexically:
//! - `[name]` → [`PatternSegment::Parameter`]
//! - `[...name]` → [`PatternSegment::CatchAll`]
//! - anything else → [`PatternSegment::Literal`], verbatim
//!
//! Nested optional catch-alls (`[[...name]]`) are not supported; the inner
//! brackets make them plain literals.

use std::fmt;

const CATCH_ALL_PREFIX: &str = "...";

/// One segment of a compiled route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    Literal(String),
    Parameter(String),
    CatchAll(String),
}

impl PatternSegment {
    /// Specificity rank used for precedence: lower wins.
    pub fn rank(&self) -> u8 {
        match self {
            PatternSegment::Literal(_) => 0,
            PatternSegment::Parameter(_) => 1,
            PatternSegment::CatchAll(_) => 2,
        }
    }
}

impl fmt::Display for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSegment::Literal(text) => f.write_str(text),
            PatternSegment::Parameter(name) => write!(f, "{{{}}}", name),
            PatternSegment::CatchAll(name) => write!(f, "{{*{}}}", name),
        }
    }
}

/// Classify one file path segment.
pub fn classify_segment(segment: &str) -> PatternSegment {
    let inner = segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .filter(|s| !s.is_empty() && !s.contains(|c| c == '[' || c == ']'));

    match inner {
        Some(name) => match name.strip_prefix(CATCH_ALL_PREFIX) {
            Some(rest) if !rest.is_empty() => PatternSegment::CatchAll(rest.to_string()),
            // `[...]` carries no parameter name.
            Some(_) => PatternSegment::Literal(segment.to_string()),
            None => PatternSegment::Parameter(name.to_string()),
        },
        None => PatternSegment::Literal(segment.to_string()),
    }
}

/// Ordered segments of a route. The empty pattern matches `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RoutePattern {
    segments: Vec<PatternSegment>,
}

impl RoutePattern {
    pub fn new(segments: Vec<PatternSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pattern identity ignoring parameter names.
    ///
    /// Two patterns with the same shape match exactly the same requests.
    pub fn shape(&self) -> Vec<SegmentShape> {
        self.segments
            .iter()
            .map(|segment| match segment {
                PatternSegment::Literal(text) => SegmentShape::Literal(text.clone()),
                PatternSegment::Parameter(_) => SegmentShape::Parameter,
                PatternSegment::CatchAll(_) => SegmentShape::CatchAll,
            })
            .collect()
    }
}

/// See [`RoutePattern::shape`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentShape {
    Literal(String),
    Parameter,
    CatchAll,
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
