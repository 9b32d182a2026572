//! Core building blocks for sp-release
//!
//! - **config**: sp-release.toml parsing and validation
//! - **context**: Run context shared by all commands
//! - **env**: Plugins directory and compiler resolution
//! - **error**: Error types with contextual help messages
//! - **host**: Release hosting abstraction (gh CLI)

pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod host;
