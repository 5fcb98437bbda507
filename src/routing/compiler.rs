//! Compile exported file paths into route entries.
//!
//! # Examples
//! ```text
//! /index.html              →  (root)
//! /about.html              →  about
//! /post/index.html         →  post
//! /post/[pid].html         →  post/{pid}
//! /post/[...slug].html     →  post/{*slug}
//! /_next/static/app.js     →  (skipped, served as an asset)
//! ```

use crate::routing::pattern::{classify_segment, RoutePattern};

const HTML_EXTENSION: &str = ".html";
const INDEX_SEGMENT: &str = "index";
const DISPLAY_PREFIX: &str = "Static page";

/// A compiled page route bound to the file it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    /// Path of the file relative to the site root, e.g. `/post/[pid].html`.
    pub physical_path: String,
    pub display_name: String,
}

/// Compile one relative path (leading `/`). Non-HTML files yield `None`.
pub fn compile(relative_path: &str) -> Option<RouteEntry> {
    let stem = relative_path.strip_suffix(HTML_EXTENSION)?;

    let mut names: Vec<&str> = stem.split('/').skip(1).collect();
    if names.last() == Some(&INDEX_SEGMENT) {
        names.pop();
    }

    let segments = names.into_iter().map(classify_segment).collect();

    Some(RouteEntry {
        pattern: RoutePattern::new(segments),
        physical_path: relative_path.to_string(),
        display_name: format!("{} {}", DISPLAY_PREFIX, relative_path),
    })
}
