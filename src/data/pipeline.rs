use std::collections::BTreeMap;
use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Filter state: site selection and payload range
// ---------------------------------------------------------------------------

/// The site filter: either every site or one concrete site.
///
/// A concrete value is always drawn from the dataset's `sites` list by the
/// selector UI, so the transforms never validate it; an unknown site simply
/// produces empty output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record from `site` passes the site filter.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

/// Inclusive payload-mass interval `[low, high]` in kilograms.
///
/// The transforms trust the interval as given: no clamping, and `low > high`
/// is treated as a filter nothing passes rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low <= payload_kg && payload_kg <= self.high
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        // Pre-load placeholder; replaced by the observed dataset bounds
        // as soon as a file is loaded.
        PayloadRange {
            low: 0.0,
            high: 10_000.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart inputs: what the renderer receives, nothing more
// ---------------------------------------------------------------------------

/// Prepared pie-chart data: ordered `(label, count)` slices plus a title.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessPie {
    pub title: String,
    pub slices: Vec<(String, usize)>,
}

/// One scatter point: payload mass (x), outcome (y), booster category (group).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub success: bool,
    pub booster: String,
}

/// Prepared scatter-chart data: points in original dataset order plus a title.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadScatter {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// The two pure transforms
// ---------------------------------------------------------------------------

/// Aggregate launch outcomes for the success pie chart.
///
/// * `All` – one slice per distinct site, counting that site's successful
///   launches (only successes are summed; a site whose launches all failed
///   still appears, with count 0). Slices come out in sorted site order.
/// * `Site(s)` – up to two slices counting the outcomes observed at `s`,
///   labelled `"Unsuccessful"` / `"Successful"`, always in that order.
///   An outcome that never occurred at `s` is omitted rather than emitted
///   as a zero-count slice.
pub fn success_pie(dataset: &LaunchDataset, selection: &SiteSelection) -> SuccessPie {
    match selection {
        SiteSelection::All => {
            let mut by_site: BTreeMap<&str, usize> =
                dataset.sites.iter().map(|s| (s.as_str(), 0)).collect();
            for rec in &dataset.records {
                if rec.success {
                    if let Some(count) = by_site.get_mut(rec.site.as_str()) {
                        *count += 1;
                    }
                }
            }
            SuccessPie {
                title: "Total Success Launches By Site".to_string(),
                slices: by_site
                    .into_iter()
                    .map(|(site, count)| (site.to_string(), count))
                    .collect(),
            }
        }
        SiteSelection::Site(site) => {
            let mut failed = 0;
            let mut succeeded = 0;
            for rec in dataset.records.iter().filter(|r| &r.site == site) {
                if rec.success {
                    succeeded += 1;
                } else {
                    failed += 1;
                }
            }
            let mut slices = Vec::new();
            if failed > 0 {
                slices.push(("Unsuccessful".to_string(), failed));
            }
            if succeeded > 0 {
                slices.push(("Successful".to_string(), succeeded));
            }
            SuccessPie {
                title: format!("Success vs. Failed Launches for {site}"),
                slices,
            }
        }
    }
}

/// Filter records for the payload/outcome scatter chart.
///
/// Retains records whose payload lies inside `range` (inclusive on both
/// ends) and, when a concrete site is selected, whose site matches.
/// Points keep the original dataset order; an empty result is valid output.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> PayloadScatter {
    let points = dataset
        .records
        .iter()
        .filter(|rec| range.contains(rec.payload_kg) && selection.matches(&rec.site))
        .map(|rec| ScatterPoint {
            payload_kg: rec.payload_kg,
            success: rec.success,
            booster: rec.booster.clone(),
        })
        .collect();

    let title = match selection {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(site) => format!("Payload vs. Success for {site}"),
    };

    PayloadScatter { title, points }
}
