//! Football Transfer History
//!
//! Normalizes per-league transfer exports into one canonical CSV and serves
//! an interactive dashboard over it.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod stats;
