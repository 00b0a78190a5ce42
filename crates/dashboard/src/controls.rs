use std::collections::BTreeSet;

use compute::{CapacityRange, FacilityFilter, distinct_sorted};
use formats::FacilityTable;
use serde::{Deserialize, Serialize};

use crate::notice::{Notice, NoticeKind};
use crate::settings::RenderSettings;

/// Everything the filter controls may offer, derived from the full table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub owners: Vec<String>,
    pub countries: Vec<String>,
    pub capacity_bounds: CapacityRange,
    /// False when no row has a capacity; the range control is then a no-op.
    pub capacity_filter_enabled: bool,
}

impl FilterOptions {
    pub fn from_table(table: &FacilityTable) -> Self {
        let rows = table.facilities();
        let observed = CapacityRange::observed(rows);
        Self {
            owners: distinct_sorted(rows.iter().map(|f| f.owner.as_str())),
            countries: distinct_sorted(rows.iter().map(|f| f.country.as_str())),
            capacity_bounds: observed.unwrap_or(CapacityRange::DEGENERATE),
            capacity_filter_enabled: observed.is_some(),
        }
    }
}

/// The user's current control state.
///
/// Empty owner or country sets mean "no restriction". A missing capacity
/// range means the full observed bounds.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub owners: BTreeSet<String>,
    #[serde(default)]
    pub countries: BTreeSet<String>,
    #[serde(default)]
    pub capacity_range: Option<CapacityRange>,
}

impl FilterSelection {
    /// Initial control state: the first owners in sorted order, every
    /// country, the full capacity range.
    pub fn defaults(options: &FilterOptions, settings: &RenderSettings) -> Self {
        Self {
            owners: options
                .owners
                .iter()
                .take(settings.default_owner_count)
                .cloned()
                .collect(),
            countries: options.countries.iter().cloned().collect(),
            capacity_range: Some(options.capacity_bounds),
        }
    }

    pub fn to_filter(&self, table: &FacilityTable) -> FacilityFilter {
        let capacity = self.capacity_range.unwrap_or_else(|| {
            CapacityRange::observed(table.facilities()).unwrap_or(CapacityRange::DEGENERATE)
        });
        FacilityFilter {
            owners: self.owners.clone(),
            countries: self.countries.clone(),
            capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub options: FilterOptions,
    pub defaults: FilterSelection,
    pub warnings: Vec<Notice>,
}

pub fn controls(table: &FacilityTable, settings: &RenderSettings) -> Controls {
    let options = FilterOptions::from_table(table);
    let defaults = FilterSelection::defaults(&options, settings);
    let mut warnings = Vec::new();
    if !options.capacity_filter_enabled {
        warnings.push(Notice::new(NoticeKind::NoCapacityData));
    }
    Controls {
        options,
        defaults,
        warnings,
    }
}
