//! CLI command implementations

pub mod growth;
pub mod list_channels;
pub mod report;
