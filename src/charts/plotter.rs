//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::stats::{CategoryValue, ClubSummary, DashboardViews, FeeStats};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, PlotUi, Points};
use std::collections::BTreeMap;

/// Single-series colour
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 260.0;

/// Label for an integer x position, empty between categories.
fn category_label(labels: &[String], x: f64) -> String {
    if x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

/// Draws dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for the n-th series.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    fn show_category_plot(
        ui: &mut egui::Ui,
        id: &str,
        labels: Vec<String>,
        y_label: &str,
        with_legend: bool,
        add_contents: impl FnOnce(&mut PlotUi),
    ) {
        let mut plot = Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .y_axis_label(y_label)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value));
        if with_legend {
            plot = plot.legend(Legend::default());
        }
        plot.show(ui, add_contents);
    }

    /// Line over ordered categories (seasons).
    pub fn draw_category_line(ui: &mut egui::Ui, id: &str, values: &[CategoryValue], y_label: &str) {
        let labels = values.iter().map(|v| v.label.clone()).collect();
        Self::show_category_plot(ui, id, labels, y_label, false, |plot_ui| {
            let points: PlotPoints = values
                .iter()
                .enumerate()
                .map(|(i, v)| [i as f64, v.value])
                .collect();
            plot_ui.line(Line::new(points).color(PRIMARY_COLOR).width(2.0).name(y_label));
        });
    }

    /// One bar per category.
    pub fn draw_category_bars(
        ui: &mut egui::Ui,
        id: &str,
        values: &[CategoryValue],
        y_label: &str,
        color: Color32,
    ) {
        let labels = values.iter().map(|v| v.label.clone()).collect();
        Self::show_category_plot(ui, id, labels, y_label, false, |plot_ui| {
            let bars: Vec<Bar> = values
                .iter()
                .enumerate()
                .map(|(i, v)| Bar::new(i as f64, v.value).width(0.7).name(&v.label))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(y_label));
        });
    }

    /// Fee per transfer, x = season, one coloured series per league.
    pub fn draw_fee_scatter(ui: &mut egui::Ui, views: &DashboardViews, min_fee: f64) {
        let seasons: Vec<String> = views
            .fee_points
            .iter()
            .map(|p| p.season.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut by_league: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for point in views.points_above(min_fee) {
            let x = seasons
                .binary_search(&point.season)
                .unwrap_or_default() as f64;
            by_league
                .entry(point.league.as_str())
                .or_default()
                .push([x, point.fee]);
        }

        Self::show_category_plot(ui, "fee_scatter", seasons, "Transfer Fee", true, |plot_ui| {
            for (idx, (league, points)) in by_league.into_iter().enumerate() {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(2.5)
                        .color(Self::series_color(idx))
                        .name(league),
                );
            }
        });
    }

    fn header(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).strong().size(11.0));
    }

    fn cell(ui: &mut egui::Ui, text: String) {
        ui.label(RichText::new(text).size(11.0));
    }

    /// Club balance table, first `limit` clubs.
    pub fn draw_club_table(ui: &mut egui::Ui, clubs: &[ClubSummary], limit: usize) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("club_summary_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for title in ["Club", "Spent (in)", "Received (out)", "# In", "# Out", "Avg Fee"] {
                            Self::header(ui, title);
                        }
                        ui.end_row();

                        for club in clubs.iter().take(limit) {
                            Self::cell(ui, club.club.clone());
                            Self::cell(ui, format!("{:.2}", club.inbound_spend));
                            Self::cell(ui, format!("{:.2}", club.outbound_income));
                            Self::cell(ui, club.inbound_count.to_string());
                            Self::cell(ui, club.outbound_count.to_string());
                            Self::cell(
                                ui,
                                club.average_fee
                                    .map(|fee| format!("{:.2}", fee))
                                    .unwrap_or_else(|| "-".to_string()),
                            );
                            ui.end_row();
                        }
                    });
            });

        if clubs.len() > limit {
            ui.label(
                RichText::new(format!("… {} more clubs", clubs.len() - limit))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }

    /// Fee distribution per league.
    pub fn draw_fee_stats_table(ui: &mut egui::Ui, stats: &[FeeStats]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("league_fee_stats_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for title in ["League", "N", "Mean", "Median", "Std", "P95", "Max"] {
                            Self::header(ui, title);
                        }
                        ui.end_row();

                        for gs in stats {
                            Self::cell(ui, gs.group_name.clone());
                            Self::cell(ui, gs.count.to_string());
                            Self::cell(ui, format!("{:.3}", gs.mean));
                            Self::cell(ui, format!("{:.3}", gs.median));
                            Self::cell(ui, format!("{:.3}", gs.std));
                            Self::cell(ui, format!("{:.3}", gs.p95));
                            Self::cell(ui, format!("{:.3}", gs.max));
                            ui.end_row();
                        }
                    });
            });
    }
}
