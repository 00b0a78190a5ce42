use foundation::LatLon;

/// Bucket used wherever a facility has no region.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Thousand tonnes per annum in one million tonnes per annum.
pub const TTPA_PER_MTPA: f64 = 1000.0;

/// One cleaned plant row.
///
/// Rows only exist with a valid location; anything that failed coordinate
/// parsing never makes it into a [`FacilityTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub name: String,
    pub owner: String,
    pub country: String,
    pub region: Option<String>,
    pub status: String,
    /// Source capacity in ttpa.
    pub capacity_ttpa: Option<f64>,
    /// Always `capacity_ttpa / 1000` when present.
    pub capacity_mtpa: Option<f64>,
    /// The composite "lat, lon" text as it appeared in the source.
    pub coordinates: String,
    pub location: LatLon,
    pub start_date: String,
    pub equipment: String,
}

impl Facility {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        country: impl Into<String>,
        location: LatLon,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            country: country.into(),
            region: None,
            status: String::new(),
            capacity_ttpa: None,
            capacity_mtpa: None,
            coordinates: format!("{}, {}", location.lat_deg, location.lon_deg),
            location,
            start_date: String::new(),
            equipment: String::new(),
        }
    }

    pub fn with_capacity_ttpa(mut self, ttpa: Option<f64>) -> Self {
        self.capacity_ttpa = ttpa;
        self.capacity_mtpa = ttpa_to_mtpa(ttpa);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = normalize_region(Some(region.into()));
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Region name, or [`UNKNOWN_REGION`] when absent.
    pub fn region_or_unknown(&self) -> &str {
        self.region.as_deref().unwrap_or(UNKNOWN_REGION)
    }
}

/// Rows read from the source versus rows retained after cleaning.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_bad_coordinates: usize,
    /// Short rows missing one of the required fields.
    pub dropped_incomplete: usize,
    /// Retained rows whose capacity could not be parsed.
    pub unknown_capacity: usize,
}

/// The immutable, cleaned dataset every view is derived from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FacilityTable {
    facilities: Vec<Facility>,
    report: LoadReport,
}

impl FacilityTable {
    pub fn new(facilities: Vec<Facility>, report: LoadReport) -> Self {
        Self { facilities, report }
    }

    /// Builds a table from already-clean rows (fixtures, in-memory sources).
    pub fn from_facilities(facilities: Vec<Facility>) -> Self {
        let unknown_capacity = facilities
            .iter()
            .filter(|f| f.capacity_mtpa.is_none())
            .count();
        let report = LoadReport {
            rows_read: facilities.len(),
            rows_kept: facilities.len(),
            dropped_bad_coordinates: 0,
            dropped_incomplete: 0,
            unknown_capacity,
        };
        Self { facilities, report }
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

/// Lenient numeric coercion: anything that is not a finite number is unknown.
pub fn parse_number(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

pub fn parse_capacity_ttpa(raw: &str) -> Option<f64> {
    parse_number(raw)
}

pub fn ttpa_to_mtpa(ttpa: Option<f64>) -> Option<f64> {
    ttpa.map(|v| v / TTPA_PER_MTPA)
}

/// Splits "lat, lon" on the literal `", "` separator.
///
/// Exactly two parts are required; each part is coerced independently, so
/// `"12.5, abc"` yields `(Some(12.5), None)`.
pub fn split_coordinates(raw: &str) -> (Option<f64>, Option<f64>) {
    let mut parts = raw.split(", ");
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lon), None) => (parse_number(lat), parse_number(lon)),
        _ => (None, None),
    }
}

pub fn parse_coordinates(raw: &str) -> Option<LatLon> {
    match split_coordinates(raw) {
        (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)),
        _ => None,
    }
}

pub(crate) fn normalize_region(region: Option<String>) -> Option<String> {
    region.filter(|r| !r.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_parses_numbers_and_rejects_placeholders() {
        assert_eq!(parse_capacity_ttpa("1500"), Some(1500.0));
        assert_eq!(parse_capacity_ttpa(" 2500.5 "), Some(2500.5));
        assert_eq!(parse_capacity_ttpa("unknown"), None);
        assert_eq!(parse_capacity_ttpa(""), None);
        assert_eq!(parse_capacity_ttpa("NaN"), None);
        assert_eq!(parse_capacity_ttpa("inf"), None);
    }

    #[test]
    fn derived_capacity_is_raw_over_thousand() {
        assert_eq!(ttpa_to_mtpa(Some(1500.0)), Some(1.5));
        assert_eq!(ttpa_to_mtpa(None), None);

        let f = Facility::new("A", "O", "C", LatLon::ORIGIN).with_capacity_ttpa(Some(250.0));
        assert_eq!(f.capacity_mtpa, Some(0.25));
    }

    #[test]
    fn coordinates_split_on_comma_space() {
        let p = parse_coordinates("36.7539610, 6.2444200").unwrap();
        assert_eq!(p.lat_deg, 36.7539610);
        assert_eq!(p.lon_deg, 6.2444200);
    }

    #[test]
    fn malformed_coordinates_are_unknown() {
        assert_eq!(parse_coordinates("bad"), None);
        assert_eq!(parse_coordinates(""), None);
        // Plain comma is not the separator.
        assert_eq!(parse_coordinates("36.75,6.24"), None);
        assert_eq!(parse_coordinates("1.0, 2.0, 3.0"), None);
        assert_eq!(split_coordinates("12.5, abc"), (Some(12.5), None));
    }

    #[test]
    fn blank_region_falls_back_to_unknown() {
        let f = Facility::new("A", "O", "C", LatLon::ORIGIN).with_region("   ");
        assert_eq!(f.region, None);
        assert_eq!(f.region_or_unknown(), UNKNOWN_REGION);

        let f = f.with_region("Europe");
        assert_eq!(f.region_or_unknown(), "Europe");
    }
}
