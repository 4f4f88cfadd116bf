//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs  (structured log events via tracing)
//!     → advisory.rs (non-fatal notices raised during validation)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → interactive console (framed warning blocks)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Advisory delivery is best-effort and never fails validation

pub mod advisory;
pub mod logging;
