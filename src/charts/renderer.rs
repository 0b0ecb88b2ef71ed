//! Static Chart Renderer
//! Renders the current dashboard views to one PNG with plotters.
//!
//! Layout (2x2 grid under a title):
//! 1. Most expensive transfer per season (line)
//! 2. Number of transfers per season (line)
//! 3. Total spend per league (bars)
//! 4. Total spend per position (bars)

use crate::stats::{CategoryValue, DashboardViews};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const LINE_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
const LEAGUE_COLOR: RGBColor = RGBColor(46, 204, 113); // Green
const POSITION_COLOR: RGBColor = RGBColor(155, 89, 182); // Purple

const MAX_X_LABELS: usize = 12;

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn label_at(values: &[CategoryValue], x: f64) -> String {
    if x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    values
        .get(x.round() as usize)
        .map(|v| v.label.clone())
        .unwrap_or_default()
}

fn y_upper(values: &[CategoryValue]) -> f64 {
    let max = values.iter().map(|v| v.value).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the four headline charts into a `width` x `height` PNG.
    pub fn render_dashboard_png(
        views: &DashboardViews,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(
            &format!("Football Transfer History ({} transfers)", views.row_count),
            ("sans-serif", 26),
        )?;

        let panels = root.split_evenly((2, 2));
        Self::draw_line_panel(
            &panels[0],
            "Most Expensive Transfer per Season",
            &views.max_fee_per_season,
        )?;
        Self::draw_line_panel(
            &panels[1],
            "Number of Transfers per Season",
            &views.transfers_per_season,
        )?;
        Self::draw_bar_panel(
            &panels[2],
            "Total Spend per League",
            &views.spend_per_league,
            LEAGUE_COLOR,
        )?;
        Self::draw_bar_panel(
            &panels[3],
            "Total Spend per Position",
            &views.spend_per_position,
            POSITION_COLOR,
        )?;

        root.present()?;
        tracing::info!(path = %path.display(), "exported dashboard image");
        Ok(())
    }

    fn draw_line_panel(
        area: &Panel<'_>,
        title: &str,
        values: &[CategoryValue],
    ) -> Result<(), Box<dyn Error>> {
        let n = values.len().max(1);
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_upper(values))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(MAX_X_LABELS))
            .x_label_formatter(&|x| label_at(values, *x))
            .draw()?;

        chart.draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, v)| (i as f64, v.value)),
            LINE_COLOR.stroke_width(2),
        ))?;
        chart.draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Circle::new((i as f64, v.value), 3, LINE_COLOR.filled())),
        )?;
        Ok(())
    }

    fn draw_bar_panel(
        area: &Panel<'_>,
        title: &str,
        values: &[CategoryValue],
        color: RGBColor,
    ) -> Result<(), Box<dyn Error>> {
        let n = values.len().max(1);
        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_upper(values))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(MAX_X_LABELS))
            .x_label_formatter(&|x| label_at(values, *x))
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, v)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, v.value)], color.filled())
        }))?;
        Ok(())
    }
}
