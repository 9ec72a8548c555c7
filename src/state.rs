use crate::color::ColorMap;
use crate::data::model::LaunchDataset;
use crate::data::pipeline::{self, PayloadRange, PayloadScatter, SiteSelection, SuccessPie};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The two chart inputs are recomputed through the setters below: a site
/// change feeds both charts, a range change only the scatter.  The transforms
/// themselves are pure; this is the only place their results are held.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<LaunchDataset>,

    /// Current site filter.
    pub selection: SiteSelection,

    /// Current payload-mass filter.
    pub range: PayloadRange,

    /// Latest aggregation output for the pie chart.
    pub pie: Option<SuccessPie>,

    /// Latest filter output for the scatter chart.
    pub scatter: Option<PayloadScatter>,

    /// Booster-category colours, rebuilt when a dataset is loaded.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: SiteSelection::All,
            range: PayloadRange::default(),
            pie: None,
            scatter: None,
            color_map: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset filters, compute both charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        let (low, high) = dataset.payload_bounds;
        self.selection = SiteSelection::All;
        self.range = PayloadRange::new(low, high);
        self.color_map = Some(ColorMap::new(&dataset.boosters));

        self.dataset = Some(dataset);
        self.recompute_pie();
        self.recompute_scatter();
        self.status_message = None;
    }

    /// Change the site filter; both charts depend on it.
    pub fn set_selection(&mut self, selection: SiteSelection) {
        self.selection = selection;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Change the payload range; only the scatter depends on it.
    pub fn set_range(&mut self, range: PayloadRange) {
        self.range = range;
        self.recompute_scatter();
    }

    fn recompute_pie(&mut self) {
        if let Some(ds) = &self.dataset {
            self.pie = Some(pipeline::success_pie(ds, &self.selection));
        }
    }

    fn recompute_scatter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.scatter = Some(pipeline::payload_scatter(ds, &self.selection, &self.range));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn dataset() -> LaunchDataset {
        let record = |site: &str, success: bool, payload_kg: f64, booster: &str| LaunchRecord {
            site: site.to_string(),
            success,
            payload_kg,
            booster: booster.to_string(),
        };
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", true, 500.0, "v1.0"),
            record("CCAFS LC-40", false, 1500.0, "v1.1"),
            record("KSC LC-39A", true, 3000.0, "FT"),
            record("KSC LC-39A", true, 7000.0, "B4"),
        ])
    }

    #[test]
    fn loading_a_dataset_resets_filters_and_fills_charts() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.selection, SiteSelection::All);
        assert_eq!(state.range, PayloadRange::new(500.0, 7000.0));
        assert!(state.color_map.is_some());

        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.slices.len(), 2);
        let scatter = state.scatter.as_ref().unwrap();
        assert_eq!(scatter.points.len(), 4);
    }

    #[test]
    fn selection_change_updates_both_charts() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_selection(SiteSelection::Site("KSC LC-39A".to_string()));

        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.title, "Success vs. Failed Launches for KSC LC-39A");
        assert_eq!(pie.slices, vec![("Successful".to_string(), 2)]);

        let scatter = state.scatter.as_ref().unwrap();
        assert_eq!(scatter.title, "Payload vs. Success for KSC LC-39A");
        assert_eq!(scatter.points.len(), 2);
    }

    #[test]
    fn range_change_narrows_the_scatter() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_range(PayloadRange::new(1000.0, 4000.0));

        let scatter = state.scatter.as_ref().unwrap();
        let masses: Vec<f64> = scatter.points.iter().map(|p| p.payload_kg).collect();
        assert_eq!(masses, vec![1500.0, 3000.0]);

        // The pie does not depend on the range.
        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.title, "Total Success Launches By Site");
        assert_eq!(pie.slices.len(), 2);
    }

    #[test]
    fn unknown_site_selection_gives_empty_charts_without_panicking() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_selection(SiteSelection::Site("Boca Chica".to_string()));

        assert!(state.pie.as_ref().unwrap().slices.is_empty());
        assert!(state.scatter.as_ref().unwrap().points.is_empty());
    }

    #[test]
    fn filter_changes_before_any_dataset_are_harmless() {
        let mut state = AppState::default();
        state.set_selection(SiteSelection::Site("CCAFS LC-40".to_string()));
        state.set_range(PayloadRange::new(0.0, 100.0));

        assert!(state.pie.is_none());
        assert!(state.scatter.is_none());
    }
}
