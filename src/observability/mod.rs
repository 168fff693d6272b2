//! Observability subsystem.
//!
//! Structured logging is initialized in `main` (tracing-subscriber with an
//! env filter); per-request HTTP traces come from `TraceLayer` in the HTTP
//! server. This module owns metrics exposition.

pub mod metrics;
