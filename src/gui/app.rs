//! Transfer Dashboard Main Application
//! Main window with filter panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::data::Dataset;
use crate::gui::{ChartViewer, FilterPanel, FilterPanelAction};
use crate::stats::{DashboardViews, TransferFilter, ViewCalculator};
use egui::SidePanel;

const EXPORT_WIDTH: u32 = 1600;
const EXPORT_HEIGHT: u32 = 1100;

/// Compute every view over the rows that pass `filter`.
pub fn compute_views(dataset: &Dataset, filter: &TransferFilter) -> DashboardViews {
    let rows = filter.apply(dataset.records());
    ViewCalculator::compute(&rows)
}

/// Main application window.
pub struct TransferDashboardApp {
    dataset: Dataset,
    filter_panel: FilterPanel,
    chart_viewer: ChartViewer,
    views: DashboardViews,
}

impl TransferDashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: Dataset) -> Self {
        let filter_panel = FilterPanel::new(&dataset);
        let views = compute_views(&dataset, &filter_panel.filter);
        let mut chart_viewer = ChartViewer::new();
        chart_viewer.clamp_min_fee(views.max_fee());

        Self {
            dataset,
            filter_panel,
            chart_viewer,
            views,
        }
    }

    /// Recompute views from the snapshot after a filter change.
    fn handle_filters_changed(&mut self) {
        self.views = compute_views(&self.dataset, &self.filter_panel.filter);
        self.filter_panel.filtered_rows = self.views.row_count;
        self.chart_viewer.clamp_min_fee(self.views.max_fee());
        tracing::debug!(
            rows = self.views.row_count,
            filter = ?self.filter_panel.filter,
            "recomputed dashboard views"
        );
    }

    /// Handle PNG export of the current views
    fn handle_export_png(&mut self) {
        if self.views.row_count == 0 {
            self.filter_panel.set_status("No transfers to export");
            return;
        }

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("transfer_dashboard.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_dashboard_png(
            &self.views,
            &output_path,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        ) {
            Ok(()) => {
                self.filter_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if self.filter_panel.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        tracing::warn!(error = %e, "could not open exported image");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "chart export failed");
                self.filter_panel
                    .set_status(&format!("Export Error: {}", e));
            }
        }
    }
}

impl eframe::App for TransferDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filters
        SidePanel::left("filter_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.filter_panel.show(ui) {
                        FilterPanelAction::FiltersChanged => self.handle_filters_changed(),
                        FilterPanelAction::ExportPng => self.handle_export_png(),
                        FilterPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.views);
        });
    }
}
