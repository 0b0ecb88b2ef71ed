//! GUI module - User interface components

mod app;
mod chart_viewer;
mod filter_panel;

pub use app::{compute_views, TransferDashboardApp};
pub use chart_viewer::ChartViewer;
pub use filter_panel::{FilterPanel, FilterPanelAction};
