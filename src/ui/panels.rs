use std::collections::BTreeSet;
use std::fmt::Display;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::toggle;
use crate::data::metrics::{format_count, format_usd};
use crate::data::model::Dimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// What a multiselect asked for this frame.
enum PickerAction {
    None,
    Changed,
    SelectAll,
    SelectNone,
}

/// One collapsible multiselect over the sorted distinct values of a column.
fn multiselect<T: Ord + Clone + Display>(
    ui: &mut Ui,
    dimension: Dimension,
    all_values: &BTreeSet<T>,
    selected: &mut BTreeSet<T>,
) -> PickerAction {
    let header_text = format!(
        "{dimension}  ({}/{})",
        selected.len(),
        all_values.len()
    );
    let mut action = PickerAction::None;

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(dimension.column())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    action = PickerAction::SelectAll;
                }
                if ui.small_button("None").clicked() {
                    action = PickerAction::SelectNone;
                }
            });

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    toggle(selected, val);
                    action = PickerAction::Changed;
                }
            }
        });

    action
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let sel = &mut state.selection;
            actions.push((
                Dimension::Year,
                multiselect(ui, Dimension::Year, &dataset.years, &mut sel.years),
            ));
            actions.push((
                Dimension::Seniority,
                multiselect(ui, Dimension::Seniority, &dataset.seniorities, &mut sel.seniorities),
            ));
            actions.push((
                Dimension::Contract,
                multiselect(ui, Dimension::Contract, &dataset.contracts, &mut sel.contracts),
            ));
            actions.push((
                Dimension::CompanySize,
                multiselect(
                    ui,
                    Dimension::CompanySize,
                    &dataset.company_sizes,
                    &mut sel.company_sizes,
                ),
            ));
        });

    let mut changed = false;
    for (dimension, action) in actions {
        match action {
            PickerAction::None => {}
            PickerAction::Changed => changed = true,
            PickerAction::SelectAll => {
                state.select_all(dimension);
            }
            PickerAction::SelectNone => {
                state.select_none(dimension);
            }
        }
    }
    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                format_count(ds.len()),
                format_count(state.visible_indices.len())
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// The four KPI cards above the charts.
pub fn metric_cards(ui: &mut Ui, state: &AppState) {
    let m = &state.snapshot.metrics;
    let cards = [
        ("Average salary", format_usd(m.mean_salary)),
        ("Maximum salary", format_usd(m.max_salary)),
        ("Total records", format_count(m.count)),
        ("Most frequent role", m.modal_role.clone()),
    ];

    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(title);
                ui.label(RichText::new(value).size(22.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
