//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! startup.rs (config → clients → GroupService → AppState)
//!
//! SIGINT / SIGTERM
//!     → signals.rs (tokio signal handlers)
//!     → shutdown.rs (Shutdown::trigger)
//!     → HttpServer graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use startup::{build_state, StartupError};
