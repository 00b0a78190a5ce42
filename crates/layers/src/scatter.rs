use formats::Facility;
use foundation::{LatLon, LonLatBounds};
use serde::{Deserialize, Serialize};

use crate::symbology::{MarkerStyle, Rgba};

/// Carto Positron GL style, a light basemap that keeps colored markers readable.
pub const DEFAULT_MAP_STYLE: &str =
    "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";
pub const DEFAULT_ZOOM: f64 = 2.0;
pub const SCATTERPLOT_KIND: &str = "ScatterplotLayer";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

/// One hoverable marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub owner: String,
    pub region: String,
    pub country: String,
    pub capacity_mtpa: f64,
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
    pub color: Rgba,
    pub tooltip: String,
}

impl ScatterPoint {
    fn from_facility(facility: &Facility, style: MarkerStyle, capacity_mtpa: f64) -> Self {
        let region = facility.region_or_unknown().to_string();
        let tooltip = format!(
            "Plant: {}\nOwner: {}\nRegion: {}\nCountry: {}\nCapacity (Mtpa): {}",
            facility.name, facility.owner, region, facility.country, capacity_mtpa
        );
        Self {
            name: facility.name.clone(),
            owner: facility.owner.clone(),
            region,
            country: facility.country.clone(),
            capacity_mtpa,
            lat: facility.location.lat_deg,
            lon: facility.location.lon_deg,
            radius_m: style.radius_m,
            color: style.color,
            tooltip,
        }
    }

    pub fn location(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// Initial camera.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl ViewState {
    pub fn centered_on(center: LatLon) -> Self {
        Self {
            latitude: center.lat_deg,
            longitude: center.lon_deg,
            zoom: DEFAULT_ZOOM,
            pitch: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterLayer {
    pub id: LayerId,
    /// Renderer-side layer type name (deck.gl's `ScatterplotLayer`).
    pub kind: &'static str,
    pub map_style: String,
    pub view_state: ViewState,
    /// `[min_lon, min_lat, max_lon, max_lat]` of all points.
    pub bounds: [f64; 4],
    pub points: Vec<ScatterPoint>,
}

impl ScatterLayer {
    /// Styles every row with a known capacity.
    ///
    /// Returns `None` when no row qualifies; callers show a warning instead
    /// of an empty map.
    pub fn build(id: u64, rows: &[&Facility], map_style: impl Into<String>) -> Option<Self> {
        let points: Vec<ScatterPoint> = rows
            .iter()
            .filter_map(|f| {
                let capacity = f.capacity_mtpa?;
                let style = MarkerStyle::for_facility(f)?;
                Some(ScatterPoint::from_facility(f, style, capacity))
            })
            .collect();

        let bounds = LonLatBounds::from_points(points.iter().map(ScatterPoint::location))?;
        let center = LatLon::mean(points.iter().map(ScatterPoint::location)).unwrap_or(LatLon::ORIGIN);

        Some(Self {
            id: LayerId(id),
            kind: SCATTERPLOT_KIND,
            map_style: map_style.into(),
            view_state: ViewState::centered_on(center),
            bounds: [bounds.min_lon, bounds.min_lat, bounds.max_lon, bounds.max_lat],
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MAP_STYLE, LayerId, ScatterLayer};
    use formats::Facility;
    use foundation::LatLon;
    use pretty_assertions::assert_eq;

    fn plant(name: &str, lat: f64, lon: f64, ttpa: Option<f64>) -> Facility {
        Facility::new(name, "Owner", "Country", LatLon::new(lat, lon))
            .with_capacity_ttpa(ttpa)
            .with_region("Europe")
    }

    #[test]
    fn skips_rows_without_capacity_and_centers_on_mean() {
        let rows = vec![
            plant("a", 10.0, 20.0, Some(1000.0)),
            plant("b", 50.0, 80.0, None),
            plant("c", 30.0, -40.0, Some(500.0)),
        ];
        let refs: Vec<&Facility> = rows.iter().collect();
        let layer = ScatterLayer::build(1, &refs, DEFAULT_MAP_STYLE).unwrap();

        assert_eq!(layer.id, LayerId(1));
        assert_eq!(layer.kind, "ScatterplotLayer");
        let names: Vec<&str> = layer.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(layer.view_state.latitude, 20.0);
        assert_eq!(layer.view_state.longitude, -10.0);
        assert_eq!(layer.view_state.zoom, 2.0);
        assert_eq!(layer.bounds, [-40.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn points_carry_tooltip_fields() {
        let rows = vec![plant("Dunkirk", 51.0, 2.3, Some(6500.0))];
        let refs: Vec<&Facility> = rows.iter().collect();
        let layer = ScatterLayer::build(7, &refs, "style.json").unwrap();
        let p = &layer.points[0];

        assert_eq!(p.radius_m, 80_000.0);
        assert_eq!(p.color, [0, 128, 255, 160]);
        assert_eq!(p.region, "Europe");
        assert_eq!(
            p.tooltip,
            "Plant: Dunkirk\nOwner: Owner\nRegion: Europe\nCountry: Country\nCapacity (Mtpa): 6.5"
        );

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["kind"], "ScatterplotLayer");
        assert_eq!(json["map_style"], "style.json");
        assert_eq!(json["points"][0]["owner"], "Owner");
    }

    #[test]
    fn nothing_plottable_is_none() {
        let rows = vec![plant("a", 1.0, 2.0, None)];
        let refs: Vec<&Facility> = rows.iter().collect();
        assert!(ScatterLayer::build(1, &refs, DEFAULT_MAP_STYLE).is_none());
        assert!(ScatterLayer::build(1, &[], DEFAULT_MAP_STYLE).is_none());
    }
}
