use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    /// Build the app, loading the startup file named by the config.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut app = Self::default();
        if let Some(path) = config.startup_file() {
            app.state.load_path(&path);
        }
        app
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a salary file to begin  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Salary Analysis for Data Careers");
                    ui.label(
                        "Explore salaries in data roles over recent years. \
                         Use the filters on the left to refine the analysis.",
                    );
                    ui.add_space(8.0);

                    ui.strong("Overall metrics (annual salary in USD)");
                    panels::metric_cards(ui, &self.state);
                    ui.separator();

                    ui.strong("Charts");
                    plot::chart_grid(ui, &self.state);
                    ui.separator();

                    ui.strong("Detailed data");
                    table::detail_table(ui, &self.state);
                });
        });
    }
}
