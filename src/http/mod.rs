//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID for logs)
//!     → site::serve_site (static mode) or proxy::forward_to_dev_server
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{HostServer, ServeMode};
