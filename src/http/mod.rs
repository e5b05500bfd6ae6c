//! Read API over HTTP.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → handlers.rs (query/path extraction)
//!     → GroupService
//!     → JSON response (200, 400 or 502)
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
