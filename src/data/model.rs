use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier (e.g. `"KSC LC-39A"`).
    pub site: String,
    /// Mission outcome: `true` when the launch succeeded (source `class` = 1).
    pub success: bool,
    /// Payload mass in kilograms, non-negative.
    pub payload_kg: f64,
    /// Booster version category (e.g. `"FT"`, `"B4"`), used only for
    /// chart grouping and passed through unmodified.
    pub booster: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed selector/legend domains.
///
/// Immutable after load: the pipeline only ever reads it, and row order is
/// preserved so scatter output stays in original dataset order.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records, in source order.
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch sites (the site selector's options).
    pub sites: Vec<String>,
    /// Sorted distinct booster version categories (the color/legend domain).
    pub boosters: Vec<String>,
    /// Observed `(min, max)` payload mass, the initial filter range.
    pub payload_bounds: (f64, f64),
}

impl LaunchDataset {
    /// Build the dataset indices from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<&str> = BTreeSet::new();
        let mut boosters: BTreeSet<&str> = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.site.as_str());
            boosters.insert(rec.booster.as_str());
            min_payload = min_payload.min(rec.payload_kg);
            max_payload = max_payload.max(rec.payload_kg);
        }

        let payload_bounds = if records.is_empty() {
            (0.0, 0.0)
        } else {
            (min_payload, max_payload)
        };

        LaunchDataset {
            sites: sites.into_iter().map(str::to_string).collect(),
            boosters: boosters.into_iter().map(str::to_string).collect(),
            payload_bounds,
            records,
        }
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
