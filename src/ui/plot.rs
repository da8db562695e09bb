use std::f32::consts::TAU;

use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{generate_palette, ColorScale};
use crate::data::charts::{CategoryCount, ChartData, GroupMean, SalaryHistogram};
use crate::data::metrics::{format_count, format_usd};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the 2×2 chart grid.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let snap = &state.snapshot;

    ui.columns(2, |cols: &mut [Ui]| {
        chart_frame(&mut cols[0], "Top 10 roles by average salary", &snap.top_roles, |ui, roles| {
            top_roles_chart(ui, roles)
        });
        chart_frame(&mut cols[1], "Annual salary distribution", &snap.histogram, histogram_chart);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        chart_frame(&mut cols[0], "Remote work distribution", &snap.remote, |ui, dist| {
            remote_donut(ui, dist)
        });
        chart_frame(
            &mut cols[1],
            "Average Data Scientist salary by country",
            &snap.data_scientists_by_country,
            |ui, countries| country_chart(ui, countries),
        );
    });
}

/// Title plus either the chart or a "no data" warning.
fn chart_frame<T>(ui: &mut Ui, title: &str, data: &ChartData<T>, draw: impl FnOnce(&mut Ui, &T)) {
    ui.strong(title);
    if let Some(payload) = data.ready() {
        draw(ui, payload);
    } else {
        ui.colored_label(Color32::from_rgb(230, 160, 40), "No data available for this chart.");
    }
}

/// Axis labels for bar charts whose argument is a category index.
fn index_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn usd_formatter(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    format_usd(mark.value)
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn top_roles_chart(ui: &mut Ui, roles: &[GroupMean]) {
    let bars: Vec<Bar> = roles
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean_salary)
                .name(format!("{}: {}", g.label, format_usd(g.mean_salary)))
                .width(0.7)
        })
        .collect();
    let labels = roles.iter().map(|g| g.label.clone()).collect();

    Plot::new("top_roles_plot")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Average annual salary (USD)")
        .x_axis_formatter(usd_formatter)
        .y_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(BAR_COLOR));
        });
}

fn histogram_chart(ui: &mut Ui, hist: &SalaryHistogram) {
    let bars: Vec<Bar> = hist
        .bins()
        .map(|(lo, hi, count)| {
            Bar::new((lo + hi) / 2.0, count as f64)
                .width(hist.bin_width)
                .name(format!("{} – {}: {count}", format_usd(lo), format_usd(hi)))
        })
        .collect();

    Plot::new("salary_histogram_plot")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Annual salary range (USD)")
        .y_axis_label("Number of records")
        .x_axis_formatter(usd_formatter)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}

/// Donut chart labelled with category and percentage.
fn remote_donut(ui: &mut Ui, dist: &[CategoryCount]) {
    let size = vec2(ui.available_width(), CHART_HEIGHT);
    let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let center = rect.center();
    let outer = 0.42 * rect.width().min(rect.height());
    let inner = outer * 0.5;
    let colors = generate_palette(dist.len());
    let text_color = ui.visuals().text_color();

    let mut start = -TAU / 4.0;
    for (slice, color) in dist.iter().zip(colors) {
        let sweep = slice.share as f32 * TAU;
        let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as usize;

        // Each step is a convex quad between the two radii.
        for s in 0..steps {
            let a0 = start + sweep * s as f32 / steps as f32;
            let a1 = start + sweep * (s + 1) as f32 / steps as f32;
            let at = |angle: f32, r: f32| center + r * vec2(angle.cos(), angle.sin());
            painter.add(Shape::convex_polygon(
                vec![at(a0, inner), at(a0, outer), at(a1, outer), at(a1, inner)],
                color,
                Stroke::NONE,
            ));
        }

        let mid = start + sweep / 2.0;
        let label_r = outer + 18.0;
        painter.text(
            pos2(center.x + label_r * mid.cos(), center.y + label_r * mid.sin()),
            Align2::CENTER_CENTER,
            format!(
                "{} {:.1}% ({})",
                slice.category,
                slice.share * 100.0,
                format_count(slice.count)
            ),
            FontId::proportional(13.0),
            text_color,
        );
        start += sweep;
    }
}

/// Per-country bars coloured on a continuous scale.
fn country_chart(ui: &mut Ui, countries: &[GroupMean]) {
    let Some(scale) = ColorScale::from_values(countries.iter().map(|g| g.mean_salary)) else {
        return;
    };
    let bars: Vec<Bar> = countries
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean_salary)
                .name(format!("{}: {}", g.label, format_usd(g.mean_salary)))
                .fill(scale.color_for(g.mean_salary))
                .width(0.8)
        })
        .collect();
    let labels = countries.iter().map(|g| g.label.clone()).collect();

    Plot::new("country_plot")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Country")
        .y_axis_label("Average annual salary (USD)")
        .x_axis_formatter(index_formatter(labels))
        .y_axis_formatter(usd_formatter)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    // Legend for the colour scale.
    let (lo, hi) = (scale.min(), scale.max());
    ui.horizontal(|ui: &mut Ui| {
        ui.small(format_usd(lo));
        for step in 0..=10 {
            let value = lo + (hi - lo) * step as f64 / 10.0;
            ui.colored_label(scale.color_for(value), "■");
        }
        ui.small(format_usd(hi));
    });
}
