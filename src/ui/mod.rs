/// UI layer: egui panels and chart rendering.
pub mod panels;
pub mod plot;
