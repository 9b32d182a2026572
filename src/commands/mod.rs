//! CLI commands for sp-release
//!
//! - **release** (default): version check, bundle, compile, archive, publish
//! - **init**: write a default `sp-release.toml`
//! - **doctor**: show the resolved environment without building anything
//!
//! All commands take the `&ReleaseContext` built once in `main`.

pub mod doctor;
pub mod init;
pub mod release;

pub use doctor::run_doctor;
pub use init::run_init;
pub use release::{RunOptions, run_release};
