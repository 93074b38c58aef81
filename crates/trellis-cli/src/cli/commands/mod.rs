//! CLI command handlers.

pub mod board;
pub mod config;
pub mod decide;
