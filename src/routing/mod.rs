//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     site walker → relative file paths
//!     → compiler.rs (file path → RouteEntry, pattern.rs classifies segments)
//!     → table.rs (ordered RouteTable)
//!     → router.rs (register with conflict checks, freeze)
//!
//! Incoming Request (path):
//!     → router.rs (page lookup)
//!     → matcher.rs (evaluate segments, pick most specific)
//!     → Return: matched page or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Segment classification is lexical and independent of the HTTP stack
//! - Most specific wins: literal > parameter > catch-all
//! - Duplicate patterns are startup errors, never silent shadowing

pub mod compiler;
pub mod matcher;
pub mod pattern;
pub mod router;
pub mod table;

pub use compiler::{compile, RouteEntry};
pub use pattern::{classify_segment, PatternSegment, RoutePattern};
pub use router::{summarize, PageMatch, PageRouter};
pub use table::{RouteHost, RouteId, RouteTable};
