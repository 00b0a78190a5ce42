use std::collections::BTreeSet;

use formats::Facility;
use foundation::round2;
use serde::{Deserialize, Serialize};

use crate::analysis::Statistics;

/// The four KPIs shown above the map.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_count: usize,
    /// Sum of known capacities, Mtpa, two decimals.
    pub total_capacity: f64,
    /// Mean of known capacities, Mtpa, two decimals. Zero when nothing is known.
    pub average_capacity: f64,
    pub distinct_country_count: usize,
}

impl SummaryMetrics {
    pub fn compute(rows: &[&Facility]) -> Self {
        let capacities = Statistics::present(rows.iter().map(|f| f.capacity_mtpa));
        let total_capacity = round2(Statistics::sum(&capacities));
        let average_capacity = if rows.is_empty() {
            0.0
        } else {
            Statistics::mean(&capacities).map(round2).unwrap_or(0.0)
        };
        let distinct_country_count = rows
            .iter()
            .map(|f| f.country.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total_count: rows.len(),
            total_capacity,
            average_capacity,
            distinct_country_count,
        }
    }
}
