//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build route table → Bind listener → Serve
//!
//! Shutdown (shutdown.rs + signals.rs):
//!     SIGTERM/SIGINT or programmatic trigger
//!     → broadcast to subscribers → drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Startup is ordered and synchronous: the listener only starts once the
//!   route table is frozen
//! - Shutdown is cooperative: the server finishes in-flight requests

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
