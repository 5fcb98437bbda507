//! Dev server proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (proxy mode)
//!     → forwarder.rs (rebuild URI at the dev server origin)
//!     → headers.rs (drop pseudo-headers and empty values)
//!     → hyper-util client → dev server
//!     → headers.rs (drop hop-by-hop response headers)
//!     → streamed back to the client
//! ```
//!
//! # Design Decisions
//! - One origin, plain HTTP, no load balancing
//! - Options validated at startup; a bad origin never reaches a request

pub mod forwarder;
pub mod headers;
pub mod options;

pub use forwarder::{forward_to_dev_server, DevServerForwarder, ForwardError};
pub use options::{DevServerOrigin, ProxyMode, ProxyOptions};
