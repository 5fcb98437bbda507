//! Page lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled page routes
//! - Reject registrations that would shadow an existing page
//! - Look up the most specific page for a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Conflict checks hash the pattern shape, so registration stays linear
//! - O(n) scan over pages per request (acceptable for exported sites)
//! - Paths are split on raw `/` before decoding; `%2F` stays inside a segment
//! - Explicit `None` rather than silent default; assets are handled by the
//!   static file fallback

use std::borrow::Cow;
use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::error::{HostError, HostResult};
use crate::routing::compiler::RouteEntry;
use crate::routing::matcher::{match_segments, precedence, split_path};
use crate::routing::pattern::{PatternSegment, SegmentShape};
use crate::routing::table::{RouteHost, RouteId, RouteTable};

/// A request path resolved to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMatch<'a> {
    pub id: RouteId,
    pub entry: &'a RouteEntry,
    pub params: Vec<(String, String)>,
}

#[derive(Debug)]
struct CompiledPage {
    entry: RouteEntry,
    precedence: Vec<u8>,
}

/// In-memory router for compiled pages.
#[derive(Debug, Default)]
pub struct PageRouter {
    pages: Vec<CompiledPage>,
    /// Shape of every registered pattern, mapped to its page index.
    shapes: HashMap<Vec<SegmentShape>, usize>,
}

impl PageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router holding every entry of `table`.
    pub fn from_table(table: &RouteTable) -> HostResult<Self> {
        let mut router = Self::new();
        table.register_all(&mut router)?;
        Ok(router)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteEntry> {
        self.pages.get(id.0).map(|p| &p.entry)
    }

    /// Find the page for a raw (percent-encoded) request path.
    pub fn match_path(&self, path: &str) -> Option<PageMatch<'_>> {
        let decoded = split_path(path)
            .into_iter()
            .map(|segment| percent_decode_str(segment).decode_utf8())
            .collect::<Result<Vec<Cow<'_, str>>, _>>()
            .ok()?;
        let segments: Vec<&str> = decoded.iter().map(|s| s.as_ref()).collect();

        self.pages
            .iter()
            .enumerate()
            .filter_map(|(i, page)| {
                match_segments(page.entry.pattern.segments(), &segments)
                    .map(|params| (i, page, params))
            })
            .min_by(|(_, a, _), (_, b, _)| a.precedence.cmp(&b.precedence))
            .map(|(i, page, params)| PageMatch {
                id: RouteId(i),
                entry: &page.entry,
                params,
            })
    }
}

impl RouteHost for PageRouter {
    fn register(&mut self, entry: RouteEntry) -> HostResult<RouteId> {
        let segments = entry.pattern.segments();
        if let Some(pos) = segments.iter().position(|s| matches!(s, PatternSegment::CatchAll(_))) {
            if pos + 1 != segments.len() {
                return Err(HostError::InvalidPattern {
                    pattern: entry.pattern.to_string(),
                    physical_path: entry.physical_path,
                    reason: "a catch-all segment must be the last segment",
                });
            }
        }

        let shape = entry.pattern.shape();
        if let Some(&existing) = self.shapes.get(&shape) {
            return Err(HostError::RouteConflict {
                pattern: entry.pattern.to_string(),
                existing: self.pages[existing].entry.physical_path.clone(),
                conflicting: entry.physical_path,
            });
        }

        let id = RouteId(self.pages.len());
        self.shapes.insert(shape, id.0);
        self.pages.push(CompiledPage {
            precedence: precedence(entry.pattern.segments()),
            entry,
        });
        Ok(id)
    }
}

/// Count pages by kind, for startup diagnostics.
pub fn summarize(router: &PageRouter) -> HashMap<&'static str, usize> {
    let mut summary = HashMap::new();
    for page in &router.pages {
        let kind = match page.entry.pattern.segments().last() {
            Some(PatternSegment::CatchAll(_)) => "catch_all",
            _ if page.precedence.iter().any(|r| *r > 0) => "dynamic",
            _ => "static",
        };
        *summary.entry(kind).or_insert(0) += 1;
    }
    summary
}
