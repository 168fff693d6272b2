//! URL routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (leading slash stripped)
//!     → table.rs (ordered scan of the top-level table)
//!     → pattern.rs (evaluate compiled patterns against the path)
//!     → view match: invoke handler with captured params
//!     → include match: strip prefix, recurse into sub-table
//!     → Return: ResolvedRoute or explicit NotFound
//!
//! Table Construction (at startup):
//!     route declarations
//!     → Compile patterns (literals, {param}, {*tail})
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Tables built at startup, immutable at runtime (lock-free reads)
//! - Declaration order is significant: first match wins
//! - A matched include commits: a miss inside it is a final NotFound
//! - Explicit NotFound rather than silent default
//! - Reverse URL generation is the exact inverse of matching

pub mod handler;
pub mod pattern;
pub mod table;

pub use handler::{view_fn, PathParams, View};
pub use pattern::{Pattern, PatternError, ReverseError};
pub use table::{DispatchError, NamedRoute, ResolvedRoute, RouteTable};
