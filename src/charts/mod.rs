//! Charts module - interactive and static chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, PALETTE, PRIMARY_COLOR};
pub use renderer::StaticChartRenderer;
