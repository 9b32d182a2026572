//! Release pipeline
//!
//! [`ReleaseManager`] walks the plugin directories, decides per plugin whether a
//! new release is needed, builds the archive, and hands it to a
//! [`ReleaseHost`](crate::core::host::ReleaseHost). Results are collected in a
//! [`RunReport`](report::RunReport).

pub mod manager;
pub mod report;

pub use manager::{PublishMode, ReleaseManager};
