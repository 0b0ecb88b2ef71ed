//! Chart Viewer Widget
//! Right side scrollable panel with one card per dashboard view.
//! Cards wrap into as many columns as the available width allows.

use crate::charts::{ChartPlotter, PALETTE, PRIMARY_COLOR};
use crate::stats::DashboardViews;
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 620.0;
const CLUB_TABLE_LIMIT: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ChartCard {
    MaxFeePerSeason,
    TransfersPerSeason,
    FeeScatter,
    ClubSummary,
    SpendPerLeague,
    TransfersPerAge,
    SpendPerPosition,
    LeagueFeeStats,
}

impl ChartCard {
    const ORDER: [ChartCard; 8] = [
        ChartCard::MaxFeePerSeason,
        ChartCard::TransfersPerSeason,
        ChartCard::FeeScatter,
        ChartCard::ClubSummary,
        ChartCard::SpendPerLeague,
        ChartCard::TransfersPerAge,
        ChartCard::SpendPerPosition,
        ChartCard::LeagueFeeStats,
    ];

    fn title(&self) -> &'static str {
        match self {
            ChartCard::MaxFeePerSeason => "📈 Most Expensive Transfer per Season",
            ChartCard::TransfersPerSeason => "📈 Number of Transfers per Season",
            ChartCard::FeeScatter => "⚫ Transfer Fees by Season",
            ChartCard::ClubSummary => "🏟 Club Transfer Balance",
            ChartCard::SpendPerLeague => "📊 Total Spend per League",
            ChartCard::TransfersPerAge => "📊 Transfers per Player Age",
            ChartCard::SpendPerPosition => "📊 Total Spend per Position",
            ChartCard::LeagueFeeStats => "📋 Fee Distribution per League",
        }
    }
}

/// Scrollable chart display area.
pub struct ChartViewer {
    /// Lower bound for the fee scatter, in fee units.
    pub min_fee: f64,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self { min_fee: 0.0 }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the slider inside the range of the current selection.
    pub fn clamp_min_fee(&mut self, max_fee: f64) {
        self.min_fee = self.min_fee.clamp(0.0, max_fee.max(0.0));
    }

    /// Draw all cards
    pub fn show(&mut self, ui: &mut egui::Ui, views: &DashboardViews) {
        if views.row_count == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No transfers match the current filters").size(20.0));
            });
            return;
        }

        let avail_width = ui.available_width();
        let num_columns = ((avail_width / (CARD_WIDTH + CHART_SPACING)).floor() as usize).max(1);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in ChartCard::ORDER.chunks(num_columns) {
                    ui.horizontal_top(|ui| {
                        for &card in row {
                            self.draw_card(ui, card, views);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_card(&mut self, ui: &mut egui::Ui, card: ChartCard, views: &DashboardViews) {
        let card_width = CARD_WIDTH - 24.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.vertical(|ui| {
                    ui.label(RichText::new(card.title()).size(16.0).strong());
                    ui.add_space(8.0);
                    self.draw_card_body(ui, card, views);
                });
            });
    }

    fn draw_card_body(&mut self, ui: &mut egui::Ui, card: ChartCard, views: &DashboardViews) {
        match card {
            ChartCard::MaxFeePerSeason => ChartPlotter::draw_category_line(
                ui,
                "max_fee_per_season",
                &views.max_fee_per_season,
                "Max Fee",
            ),
            ChartCard::TransfersPerSeason => ChartPlotter::draw_category_line(
                ui,
                "transfers_per_season",
                &views.transfers_per_season,
                "Transfers",
            ),
            ChartCard::FeeScatter => {
                let max_fee = views.max_fee();
                ui.horizontal(|ui| {
                    ui.label("Min fee:");
                    ui.add(egui::Slider::new(&mut self.min_fee, 0.0..=max_fee).max_decimals(2));
                });
                let shown = views.points_above(self.min_fee).count();
                ui.label(
                    RichText::new(format!("{} transfers with a known fee shown", shown))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ChartPlotter::draw_fee_scatter(ui, views, self.min_fee);
            }
            ChartCard::ClubSummary => {
                ChartPlotter::draw_club_table(ui, &views.club_summary, CLUB_TABLE_LIMIT)
            }
            ChartCard::SpendPerLeague => ChartPlotter::draw_category_bars(
                ui,
                "spend_per_league",
                &views.spend_per_league,
                "Total Fee",
                PALETTE[1],
            ),
            ChartCard::TransfersPerAge => ChartPlotter::draw_category_bars(
                ui,
                "transfers_per_age",
                &views.transfers_per_age,
                "Transfers",
                PRIMARY_COLOR,
            ),
            ChartCard::SpendPerPosition => ChartPlotter::draw_category_bars(
                ui,
                "spend_per_position",
                &views.spend_per_position,
                "Total Fee",
                PALETTE[2],
            ),
            ChartCard::LeagueFeeStats => {
                ChartPlotter::draw_fee_stats_table(ui, &views.league_fee_stats)
            }
        }
    }
}
