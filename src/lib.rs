//! Static export host.
//!
//! Serves a statically exported single-page application. Page routes are
//! synthesized from the exported file tree (`[param]`, `[...param]`, `index`
//! collapsing); during development every request can instead be forwarded to
//! a running dev server.

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod routing;
pub mod site;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::HostConfig;
pub use error::{HostError, HostResult};
pub use http::HostServer;
pub use lifecycle::Shutdown;
