//! Steel plant CSV ingestion.
//!
//! The source is a wide CSV export; only the columns in [`columns`] are read,
//! everything else is ignored. Cleaning happens row by row:
//! - capacity is coerced to a number, unknown on failure
//! - the composite coordinate column is split into lat/lon
//! - rows without both coordinates are dropped, they cannot be placed on a map

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::facility::{
    Facility, FacilityTable, LoadReport, normalize_region, parse_capacity_ttpa, split_coordinates,
    ttpa_to_mtpa,
};
use foundation::LatLon;

/// Source header names.
pub mod columns {
    pub const PLANT_NAME: &str = "Plant name (English)_x";
    pub const OWNER: &str = "Owner";
    pub const COUNTRY: &str = "Country/Area_x";
    pub const CAPACITY_TTPA: &str = "Nominal crude steel capacity (ttpa)";
    pub const COORDINATES: &str = "Coordinates";
    pub const REGION: &str = "Region";
    pub const STATUS: &str = "Status";
    pub const START_DATE: &str = "Start date_x";
    pub const EQUIPMENT: &str = "Main production equipment";

    pub const REQUIRED: [&str; 5] = [PLANT_NAME, OWNER, COUNTRY, CAPACITY_TTPA, COORDINATES];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    DataSourceNotFound { path: PathBuf },
    Io { path: PathBuf, message: String },
    Csv { line: Option<u64>, message: String },
    MissingColumn(&'static str),
}

impl LoadError {
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LoadError::DataSourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }

    fn from_csv(err: csv::Error) -> Self {
        LoadError::Csv {
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::DataSourceNotFound { .. })
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::DataSourceNotFound { path } => write!(
                f,
                "the data file '{}' was not found, please ensure it is uploaded",
                path.display()
            ),
            LoadError::Io { path, message } => {
                write!(f, "failed to read '{}': {message}", path.display())
            }
            LoadError::Csv {
                line: Some(line),
                message,
            } => write!(f, "malformed CSV at line {line}: {message}"),
            LoadError::Csv { line: None, message } => write!(f, "malformed CSV: {message}"),
            LoadError::MissingColumn(name) => write!(f, "missing required column '{name}'"),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Deserialize)]
struct SourceRow {
    #[serde(rename = "Plant name (English)_x")]
    name: String,
    #[serde(rename = "Owner")]
    owner: String,
    #[serde(rename = "Country/Area_x")]
    country: String,
    #[serde(rename = "Nominal crude steel capacity (ttpa)")]
    capacity: String,
    #[serde(rename = "Coordinates")]
    coordinates: String,
    #[serde(rename = "Region", default)]
    region: Option<String>,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Start date_x", default)]
    start_date: String,
    #[serde(rename = "Main production equipment", default)]
    equipment: String,
}

impl SourceRow {
    fn into_facility(self) -> Option<Facility> {
        let (lat, lon) = split_coordinates(&self.coordinates);
        let location = LatLon::new(lat?, lon?);
        let capacity_ttpa = parse_capacity_ttpa(&self.capacity);
        Some(Facility {
            name: self.name,
            owner: self.owner,
            country: self.country,
            region: normalize_region(self.region),
            status: self.status,
            capacity_ttpa,
            capacity_mtpa: ttpa_to_mtpa(capacity_ttpa),
            coordinates: self.coordinates,
            location,
            start_date: self.start_date,
            equipment: self.equipment,
        })
    }
}

/// Reads and cleans a facility CSV from any reader.
pub fn parse_facilities<R: Read>(reader: R) -> Result<FacilityTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(LoadError::from_csv)?.clone();
    for required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut report = LoadReport::default();
    let mut facilities = Vec::new();
    for row in rdr.deserialize::<SourceRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                report.rows_read += 1;
                report.dropped_incomplete += 1;
                debug!(
                    line = err.position().map(|p| p.line()),
                    "dropping incomplete row: {err}"
                );
                continue;
            }
            Err(err) => return Err(LoadError::from_csv(err)),
        };
        report.rows_read += 1;
        match row.into_facility() {
            Some(facility) => {
                if facility.capacity_mtpa.is_none() {
                    report.unknown_capacity += 1;
                }
                facilities.push(facility);
            }
            None => report.dropped_bad_coordinates += 1,
        }
    }
    report.rows_kept = facilities.len();

    debug!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        dropped = report.dropped_bad_coordinates,
        incomplete = report.dropped_incomplete,
        unknown_capacity = report.unknown_capacity,
        "facility csv parsed"
    );
    Ok(FacilityTable::new(facilities, report))
}

/// Reads and cleans a facility CSV from disk.
pub fn load_facilities(path: impl AsRef<Path>) -> Result<FacilityTable, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| LoadError::from_io(path, e))?;
    let table = parse_facilities(bytes.as_slice())?;
    info!(
        "loaded {} facilities from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::{LoadError, load_facilities, parse_facilities};
    use crate::facility::LoadReport;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const HEADER: &str = "Plant name (English)_x,Owner,Country/Area_x,Nominal crude steel capacity (ttpa),Coordinates,Region,Status,Start date_x,Main production equipment\n";

    fn csv(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    #[test]
    fn cleans_rows_and_reports_counts() {
        let data = csv(&[
            "Algeria Works,ACME,Algeria,1500,\"36.7539610, 6.2444200\",Africa,operating,1969,BOF",
            "Broken,ACME,Algeria,100,bad,Africa,operating,,",
            "Unknown Cap,Other,Brazil,unknown,\"-23.5, -46.6\",Central & South America ,operating,,EAF",
        ]);
        let table = parse_facilities(data.as_bytes()).unwrap();

        assert_eq!(
            table.report(),
            LoadReport {
                rows_read: 3,
                rows_kept: 2,
                dropped_bad_coordinates: 1,
                dropped_incomplete: 0,
                unknown_capacity: 1,
            }
        );

        let first = &table.facilities()[0];
        assert_eq!(first.name, "Algeria Works");
        assert_eq!(first.capacity_ttpa, Some(1500.0));
        assert_eq!(first.capacity_mtpa, Some(1.5));
        assert_eq!(first.location.lat_deg, 36.7539610);
        assert_eq!(first.location.lon_deg, 6.2444200);
        assert_eq!(first.coordinates, "36.7539610, 6.2444200");
        assert_eq!(first.start_date, "1969");
        assert_eq!(first.equipment, "BOF");

        let second = &table.facilities()[1];
        assert_eq!(second.capacity_ttpa, None);
        assert_eq!(second.capacity_mtpa, None);
        assert_eq!(second.region.as_deref(), Some("Central & South America "));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let data = "Plant name (English)_x,Owner,Country/Area_x,Nominal crude steel capacity (ttpa),Coordinates\n\
                    A,O,Chile,800,\"-33.4, -70.6\"\n";
        let table = parse_facilities(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        let f = &table.facilities()[0];
        assert_eq!(f.region, None);
        assert_eq!(f.region_or_unknown(), "Unknown");
        assert_eq!(f.status, "");
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let data = "Plant name (English)_x,Owner,Country/Area_x,Coordinates\nA,O,C,\"1, 2\"\n";
        let err = parse_facilities(data.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingColumn("Nominal crude steel capacity (ttpa)")
        );
    }

    #[test]
    fn short_rows_keep_what_they_have() {
        let data = csv(&[
            "Full,O,Chile,800,\"-33.4, -70.6\",Central & South America,operating,2001,EAF",
            "No trailing optionals,O,Peru,1200,\"-12.0, -77.0\"",
            "No coordinates,O,Peru,1200",
        ]);
        let table = parse_facilities(data.as_bytes()).unwrap();

        assert_eq!(
            table.report(),
            LoadReport {
                rows_read: 3,
                rows_kept: 2,
                dropped_bad_coordinates: 0,
                dropped_incomplete: 1,
                unknown_capacity: 0,
            }
        );
        let short = &table.facilities()[1];
        assert_eq!(short.name, "No trailing optionals");
        assert_eq!(short.capacity_mtpa, Some(1.2));
        assert_eq!(short.region, None);
        assert_eq!(short.equipment, "");
    }

    #[test]
    fn undecodable_bytes_fail_the_load() {
        let mut data = csv(&["A,O,C,1,\"1, 2\",Europe,,,"]).into_bytes();
        data.extend_from_slice(b"B,O,\xff\xfe,1,\"1, 2\",Europe,,,\n");
        let err = parse_facilities(data.as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }), "{err:?}");
    }

    #[test]
    fn missing_file_is_data_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steel_plants.csv");
        let err = load_facilities(&path).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("steel_plants.csv"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv(&["A,O,C,2000,\"10.0, 20.0\",Europe,operating,,"]).as_bytes())
            .unwrap();
        let table = load_facilities(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.facilities()[0].capacity_mtpa, Some(2.0));
    }
}
