use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::metrics::format_usd;
use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Role",
    "Remote",
    "Salary (USD)",
    "Residence",
];

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Detailed table of the filtered records
// ---------------------------------------------------------------------------

/// Render every visible record; rows are virtualised by `TableBuilder`.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.view() else {
        return;
    };
    if view.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("detail_table")
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let rec = view.records()[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.year.to_string());
                });
                for text in [
                    &rec.seniority,
                    &rec.contract,
                    &rec.company_size,
                    &rec.role,
                    &rec.remote,
                ] {
                    row.col(|ui: &mut Ui| {
                        ui.label(text.as_str());
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd(rec.salary_usd));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.residence_iso3.as_str());
                });
            });
        });
}
