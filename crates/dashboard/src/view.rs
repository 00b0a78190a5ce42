use compute::SummaryMetrics;
use formats::{Facility, FacilityTable, columns};
use layers::ScatterLayer;
use serde::Serialize;
use tracing::debug;

use crate::controls::FilterSelection;
use crate::notice::{Notice, NoticeKind};
use crate::settings::RenderSettings;

pub const PLANTS_LAYER_ID: u64 = 1;

/// Header labels for [`TableRow`] fields, in field order.
pub const TABLE_COLUMNS: [&str; 10] = [
    columns::PLANT_NAME,
    columns::OWNER,
    columns::COUNTRY,
    columns::REGION,
    columns::STATUS,
    columns::CAPACITY_TTPA,
    "Capacity_Mtpa",
    columns::START_DATE,
    columns::EQUIPMENT,
    columns::COORDINATES,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub owner: String,
    pub country: String,
    pub region: Option<String>,
    pub status: String,
    pub capacity_ttpa: Option<f64>,
    pub capacity_mtpa: Option<f64>,
    pub start_date: String,
    pub equipment: String,
    pub coordinates: String,
}

impl From<&Facility> for TableRow {
    fn from(f: &Facility) -> Self {
        Self {
            name: f.name.clone(),
            owner: f.owner.clone(),
            country: f.country.clone(),
            region: f.region.clone(),
            status: f.status.clone(),
            capacity_ttpa: f.capacity_ttpa,
            capacity_mtpa: f.capacity_mtpa,
            start_date: f.start_date.clone(),
            equipment: f.equipment.clone(),
            coordinates: f.coordinates.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapView {
    Ready { layer: ScatterLayer },
    Unavailable { notice: Notice },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub metrics: SummaryMetrics,
    pub map: MapView,
    pub columns: [&'static str; 10],
    pub table: Vec<TableRow>,
    pub warnings: Vec<Notice>,
}

/// What the presentation layer draws for one control state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewModel {
    /// Nothing matched; controls stay usable, nothing else is drawn.
    NoMatches { notice: Notice },
    Dashboard(DashboardView),
}

impl ViewModel {
    pub fn dashboard(&self) -> Option<&DashboardView> {
        match self {
            ViewModel::Dashboard(view) => Some(view),
            ViewModel::NoMatches { .. } => None,
        }
    }
}

/// Filters the table and derives every view from the result.
///
/// Pure: the same table, selection and settings always give the same model.
pub fn render(
    table: &FacilityTable,
    selection: &FilterSelection,
    settings: &RenderSettings,
) -> ViewModel {
    let filter = selection.to_filter(table);
    let rows = filter.apply(table.facilities());
    debug!(
        matched = rows.len(),
        total = table.len(),
        "filter applied"
    );

    if rows.is_empty() {
        return ViewModel::NoMatches {
            notice: Notice::new(NoticeKind::EmptyFilterResult),
        };
    }

    let mut warnings = Vec::new();
    if table.facilities().iter().all(|f| f.capacity_mtpa.is_none()) {
        warnings.push(Notice::new(NoticeKind::NoCapacityData));
    }

    let map = match ScatterLayer::build(PLANTS_LAYER_ID, &rows, settings.map_style.clone()) {
        Some(layer) => MapView::Ready { layer },
        None => MapView::Unavailable {
            notice: Notice::new(NoticeKind::NoPlottableRows),
        },
    };

    ViewModel::Dashboard(DashboardView {
        metrics: SummaryMetrics::compute(&rows),
        map,
        columns: TABLE_COLUMNS,
        table: rows.iter().map(|f| TableRow::from(*f)).collect(),
        warnings,
    })
}
