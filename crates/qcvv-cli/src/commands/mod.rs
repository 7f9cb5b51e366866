//! CLI command implementations.

pub mod analyze;
pub mod build;
pub mod common;
pub mod gates;
pub mod run;
pub mod version;
