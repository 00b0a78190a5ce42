use std::collections::BTreeSet;

use formats::Facility;
use foundation::round2;
use serde::{Deserialize, Serialize};

use crate::analysis::Statistics;

/// Inclusive capacity window in Mtpa.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRange {
    pub min: f64,
    pub max: f64,
}

impl CapacityRange {
    /// Used when no row carries a capacity; only unknown-capacity rows exist then.
    pub const DEGENERATE: CapacityRange = CapacityRange { min: 0.0, max: 0.0 };

    pub const UNBOUNDED: CapacityRange = CapacityRange {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, mtpa: f64) -> bool {
        mtpa >= self.min && mtpa <= self.max
    }

    /// Observed min/max of known capacities, rounded to two decimals.
    pub fn observed(facilities: &[Facility]) -> Option<CapacityRange> {
        let values = Statistics::present(facilities.iter().map(|f| f.capacity_mtpa));
        let (min, max) = Statistics::min_max(&values)?;
        Some(CapacityRange::new(round2(min), round2(max)))
    }
}

/// Owner, country and capacity predicates, AND-combined.
///
/// An empty owner or country set places no restriction on that column.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityFilter {
    pub owners: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub capacity: CapacityRange,
}

impl Default for FacilityFilter {
    fn default() -> Self {
        Self {
            owners: BTreeSet::new(),
            countries: BTreeSet::new(),
            capacity: CapacityRange::UNBOUNDED,
        }
    }
}

fn set_allows(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn capacity_allows(range: &CapacityRange, mtpa: Option<f64>) -> bool {
    let Some(mtpa) = mtpa else {
        // Unknown capacity is never excluded by the range.
        return true;
    };
    range.contains(mtpa)
}

impl FacilityFilter {
    pub fn matches(&self, facility: &Facility) -> bool {
        set_allows(&self.owners, &facility.owner)
            && set_allows(&self.countries, &facility.country)
            && capacity_allows(&self.capacity, facility.capacity_mtpa)
    }

    /// Rows that pass, in input order.
    pub fn apply<'a, I>(&self, rows: I) -> Vec<&'a Facility>
    where
        I: IntoIterator<Item = &'a Facility>,
    {
        rows.into_iter().filter(|f| self.matches(f)).collect()
    }
}

/// Sorted distinct values of one text column.
pub fn distinct_sorted<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
