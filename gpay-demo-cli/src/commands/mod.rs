//! CLI command implementations

pub mod bridge;
pub mod simulate;
pub mod url;
