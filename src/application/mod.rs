//! Application layer module
//!
//! This module contains the main application structure: it wires the
//! configured data sources into the leaderboard service and serves one read.

pub mod app;

// Re-export main application type
pub use app::Application;
