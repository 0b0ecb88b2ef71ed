//! Stats module - filters and aggregate views

mod calculator;
mod filter;

pub use calculator::{CategoryValue, ClubSummary, DashboardViews, FeePoint, FeeStats, ViewCalculator};
pub use filter::{MovementFilter, TransferFilter};
