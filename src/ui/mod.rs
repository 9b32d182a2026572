//! Terminal output

pub mod reporter;

pub use reporter::{Reporter, Summary, SummaryKind};
