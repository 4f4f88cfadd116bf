//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Watch loop stops → Exit
//! ```
//!
//! # Design Decisions
//! - Only long-running commands (watch mode) need lifecycle handling
//! - One-shot validation exits as soon as the result is known

pub mod shutdown;
pub mod signals;
