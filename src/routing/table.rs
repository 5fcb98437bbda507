//! Route table construction.
//!
//! The table is built once, from one walk of the site root, and never
//! refreshed. Entries keep walk order; precedence between overlapping
//! patterns is the host router's job.

use std::sync::Arc;

use crate::error::HostResult;
use crate::routing::compiler::{compile, RouteEntry};
use crate::site::provider::DirectoryProvider;
use crate::site::walker::FileWalker;

/// Identity of a registered route within its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub usize);

/// A router that compiled pages can be registered with.
pub trait RouteHost {
    /// Register one page. Conflicts with existing routes must be errors.
    fn register(&mut self, entry: RouteEntry) -> HostResult<RouteId>;
}

/// Ordered, read-only list of compiled page routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Arc<[RouteEntry]>,
}

impl RouteTable {
    /// Walk `provider` and compile every HTML file.
    pub fn build(provider: &dyn DirectoryProvider) -> HostResult<Self> {
        let mut entries = Vec::new();
        for path in FileWalker::new(provider) {
            let path = path?;
            match compile(&path) {
                Some(entry) => {
                    tracing::debug!(pattern = %entry.pattern, file = %entry.physical_path, "Compiled page route");
                    entries.push(entry);
                }
                None => tracing::trace!(file = %path, "Not a page, left to static files"),
            }
        }

        tracing::info!(routes = entries.len(), "Route table built");
        Ok(Self {
            entries: entries.into(),
        })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every entry with `host`, in table order.
    pub fn register_all(&self, host: &mut dyn RouteHost) -> HostResult<Vec<RouteId>> {
        self.entries
            .iter()
            .map(|entry| host.register(entry.clone()))
            .collect()
    }
}
