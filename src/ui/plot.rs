use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Plot, PlotPoints, Points, Polygon};

use crate::color::{ColorMap, generate_palette};
use crate::data::pipeline::{PayloadScatter, SuccessPie};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – the two launch charts
// ---------------------------------------------------------------------------

/// Render the success pie and the payload scatter, stacked vertically.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view launches  (File → Open…)");
        });
        return;
    }

    // Split the panel between the two charts, leaving room for the titles.
    let chart_height = (ui.available_height() / 2.0 - 24.0).max(120.0);

    if let Some(pie) = &state.pie {
        ui.strong(pie.title.as_str());
        success_pie_plot(ui, pie, chart_height);
    }
    if let Some(scatter) = &state.scatter {
        ui.strong(scatter.title.as_str());
        payload_scatter_plot(ui, scatter, state.color_map.as_ref(), chart_height);
    }
}

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

/// Draw the aggregation as filled wedges on a locked, axis-less square plot.
/// The slice order and labels come straight from the pipeline output.
fn success_pie_plot(ui: &mut Ui, pie: &SuccessPie, height: f32) {
    let total: usize = pie.slices.iter().map(|(_, count)| count).sum();

    Plot::new("success_pie")
        .legend(egui_plot::Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let colors = generate_palette(pie.slices.len());
            let mut start = 0.0;
            for ((label, count), color) in pie.slices.iter().zip(colors) {
                let fraction = *count as f64 / total as f64;
                let end = start + fraction;
                let percent = 100.0 * fraction;

                let wedge = Polygon::new(wedge_points(start, end))
                    .name(format!("{label}: {count} ({percent:.0}%)"))
                    .fill_color(color)
                    .stroke(Stroke::new(1.0, color));
                plot_ui.polygon(wedge);

                start = end;
            }
        });
}

/// One pie wedge spanning `[start, end]` turns, clockwise from 12 o'clock:
/// a fan from the origin out to the unit-circle arc.
fn wedge_points(start: f64, end: f64) -> PlotPoints<'static> {
    let steps = ((end - start) * 64.0).ceil().max(1.0) as usize;
    let arc = (0..=steps).map(move |i| {
        let angle = TAU * (start + (end - start) * i as f64 / steps as f64);
        [angle.sin(), angle.cos()]
    });
    std::iter::once([0.0, 0.0]).chain(arc).collect()
}

// ---------------------------------------------------------------------------
// Payload scatter
// ---------------------------------------------------------------------------

/// Render the filtered launches, one coloured series per booster category.
fn payload_scatter_plot(
    ui: &mut Ui,
    scatter: &PayloadScatter,
    color_map: Option<&ColorMap>,
    height: f32,
) {
    // Partition by booster category so each gets one legend entry; the
    // pipeline already tagged every point with its group.
    let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &scatter.points {
        let y = if point.success { 1.0 } else { 0.0 };
        groups
            .entry(point.booster.as_str())
            .or_default()
            .push([point.payload_kg, y]);
    }

    Plot::new("payload_scatter")
        .legend(egui_plot::Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Mission success (0 = failed, 1 = successful)")
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, series) in groups {
                let color = color_map
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let series_points: PlotPoints = series.into_iter().collect();
                let points = Points::new(series_points)
                    .name(category)
                    .color(color)
                    .radius(4.0);

                plot_ui.points(points);
            }
        });
}
