use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::pipeline::{PayloadRange, SiteSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let sites = dataset.sites.clone();
    let (_, max_payload) = dataset.payload_bounds;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Site selector ----
            ui.strong("Launch site");
            egui::ComboBox::from_id_salt("site_select")
                .selected_text(state.selection.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.selection == SiteSelection::All, "All Sites")
                        .clicked()
                    {
                        state.set_selection(SiteSelection::All);
                    }
                    for site in &sites {
                        let candidate = SiteSelection::Site(site.clone());
                        if ui
                            .selectable_label(state.selection == candidate, site)
                            .clicked()
                        {
                            state.set_selection(candidate);
                        }
                    }
                });

            ui.separator();

            // ---- Payload range ----
            // Two independent sliders; the pipeline treats a crossed range
            // as a filter nothing passes, so no clamping here.
            ui.strong("Payload range (kg)");
            let mut low = state.range.low;
            let mut high = state.range.high;
            let low_changed = ui
                .add(
                    egui::Slider::new(&mut low, 0.0..=max_payload)
                        .text("min")
                        .suffix(" kg"),
                )
                .changed();
            let high_changed = ui
                .add(
                    egui::Slider::new(&mut high, 0.0..=max_payload)
                        .text("max")
                        .suffix(" kg"),
                )
                .changed();
            if low_changed || high_changed {
                state.set_range(PayloadRange::new(low, high));
            }

            ui.separator();

            // ---- Booster-category legend (scatter colours) ----
            if let Some(color_map) = &state.color_map {
                egui::CollapsingHeader::new(RichText::new("Booster categories").strong())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for (label, color) in color_map.legend_entries() {
                            ui.label(RichText::new(label).color(color));
                        }
                    });
            }
        });
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
            let in_view = state.scatter.as_ref().map_or(0, |s| s.points.len());
            ui.label(format!(
                "{} launches loaded, {} in payload view",
                ds.len(),
                in_view
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches across {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
