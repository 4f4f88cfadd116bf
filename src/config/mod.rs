//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML/JSON)
//!     → loader.rs (parse, deserialize & normalize)
//!     → validation (semantic checks, first violation wins)
//!     → DeployConfig (validated, immutable)
//!     → handed to downstream generators
//!
//! In watch mode:
//!     watcher.rs detects change
//!     → loader.rs loads and validates again
//!     → outcome reported on a channel
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Validation separates syntactic (serde) from semantic checks
//! - The loader fills defaults; the validator never mutates

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::{load_config, ConfigError, ConfigFormat};
pub use schema::{CloudProvider, ComponentConfig, DeployConfig, SiteConfig};
