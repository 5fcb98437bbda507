//! Static site subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     root.rs (content root + root path → site directory)
//!     → provider.rs (directory listings)
//!     → walker.rs (every file, depth-first, stack-based)
//!     → routing (compile pages)
//!
//! Request:
//!     → dispatcher.rs (page match → rewrite to file, else asset)
//!     → ServeDir (bytes, content type, conditional requests)
//! ```

pub mod dispatcher;
pub mod provider;
pub mod root;
pub mod walker;

pub use dispatcher::{serve_site, SiteState, StaticRouteDispatcher};
pub use provider::{DirectoryProvider, FileEntry, LocalDirectory, MemoryDirectory};
pub use root::RootOptions;
pub use walker::FileWalker;
