//! GPay Demo CLI
//!
//! Library half of the `gpay-demo` binary, exposed for integration tests.

pub mod commands;
pub mod ui;
