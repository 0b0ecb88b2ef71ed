//! Filter Panel Widget
//! Left side panel with the dataset filters and export controls.

use crate::data::Dataset;
use crate::stats::{MovementFilter, TransferFilter};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::collections::BTreeSet;

const LABEL_WIDTH: f32 = 90.0;
const COMBO_WIDTH: f32 = 150.0;

/// Choices offered by the filters, taken from the snapshot once.
struct FilterOptions {
    clubs: Vec<String>,
    leagues: Vec<String>,
    positions: Vec<String>,
    years: Vec<i32>,
}

/// Left side panel holding the user's filter selections.
pub struct FilterPanel {
    pub filter: TransferFilter,
    options: FilterOptions,
    club_search: String,
    total_rows: usize,
    pub filtered_rows: usize,
    pub open_after_export: bool,
    pub status: String,
}

impl FilterPanel {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            filter: TransferFilter::default(),
            options: FilterOptions {
                clubs: dataset.clubs(),
                leagues: dataset.leagues(),
                positions: dataset.positions(),
                years: dataset.years(),
            },
            club_search: String::new(),
            total_rows: dataset.len(),
            filtered_rows: dataset.len(),
            open_after_export: true,
            status: dataset
                .source()
                .map(|path| format!("Loaded {}", path.display()))
                .unwrap_or_else(|| "Ready".to_string()),
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn section_title(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(14.0).strong());
        ui.add_space(5.0);
    }

    /// Checkbox list bound to a selection set. Returns true on change.
    fn multi_select(
        ui: &mut egui::Ui,
        id: &str,
        title: &str,
        options: &[String],
        selected: &mut BTreeSet<String>,
        search: Option<&str>,
    ) -> bool {
        let mut changed = false;
        let header = if selected.is_empty() {
            format!("{} (all)", title)
        } else {
            format!("{} ({} selected)", title, selected.len())
        };

        egui::CollapsingHeader::new(header)
            .id_salt(id)
            .show(ui, |ui| {
                let needle = search.map(str::to_lowercase).unwrap_or_default();
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for option in options
                            .iter()
                            .filter(|o| needle.is_empty() || o.to_lowercase().contains(&needle))
                        {
                            let mut checked = selected.contains(option);
                            if ui.checkbox(&mut checked, option).changed() {
                                if checked {
                                    selected.insert(option.clone());
                                } else {
                                    selected.remove(option);
                                }
                                changed = true;
                            }
                        }
                    });

                if !selected.is_empty() && ui.small_button("Clear").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

        changed
    }

    fn year_combo(ui: &mut egui::Ui, id: &str, label: &str, years: &[i32], value: &mut Option<i32>) -> bool {
        let mut changed = false;
        let selected_text = value
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Any".to_string());

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(COMBO_WIDTH)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    changed |= ui.selectable_value(&mut *value, None, "Any").changed();
                    for &year in years {
                        changed |= ui
                            .selectable_value(&mut *value, Some(year), year.to_string())
                            .changed();
                    }
                });
        });

        changed
    }

    /// Draw the filter panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> FilterPanelAction {
        let mut changed = false;
        let mut action = FilterPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("⚽ Transfer History")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Top leagues, every transfer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Filters =====
        Self::section_title(ui, "🔧 Filters");

        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Club search:"));
            ui.add(egui::TextEdit::singleline(&mut self.club_search).desired_width(COMBO_WIDTH));
        });
        changed |= Self::multi_select(
            ui,
            "club_filter",
            "Clubs",
            &self.options.clubs,
            &mut self.filter.clubs,
            Some(self.club_search.as_str()),
        );

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("Movement:"));
            ComboBox::from_id_salt("movement_filter")
                .width(COMBO_WIDTH)
                .selected_text(self.filter.movement.label())
                .show_ui(ui, |ui| {
                    for movement in MovementFilter::ALL {
                        changed |= ui
                            .selectable_value(&mut self.filter.movement, movement, movement.label())
                            .changed();
                    }
                });
        });

        ui.add_space(5.0);
        changed |= Self::year_combo(
            ui,
            "min_year_filter",
            "Min year:",
            &self.options.years,
            &mut self.filter.min_year,
        );
        changed |= Self::year_combo(
            ui,
            "max_year_filter",
            "Max year:",
            &self.options.years,
            &mut self.filter.max_year,
        );

        ui.add_space(5.0);
        changed |= Self::multi_select(
            ui,
            "league_filter",
            "Leagues",
            &self.options.leagues,
            &mut self.filter.leagues,
            None,
        );
        changed |= Self::multi_select(
            ui,
            "position_filter",
            "Positions",
            &self.options.positions,
            &mut self.filter.positions,
            None,
        );

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.filter.is_active(), |ui| {
                if ui.button("↺ Reset Filters").clicked() {
                    self.filter = TransferFilter::default();
                    changed = true;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        Self::section_title(ui, "📄 Export");
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add_enabled(self.filtered_rows > 0, button).clicked() {
                action = FilterPanelAction::ExportPng;
            }
            ui.checkbox(&mut self.open_after_export, "Open after export");
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        Self::section_title(ui, "📊 Status");
        ui.label(
            RichText::new(format!(
                "{} of {} transfers selected",
                self.filtered_rows, self.total_rows
            ))
            .size(12.0),
        );
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if changed {
            FilterPanelAction::FiltersChanged
        } else {
            action
        }
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    FiltersChanged,
    ExportPng,
}
