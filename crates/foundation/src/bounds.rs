use crate::geo::LatLon;

/// Axis-aligned lon/lat extent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LonLatBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl LonLatBounds {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        LonLatBounds {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLon>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = LonLatBounds::new(first.lon_deg, first.lat_deg, first.lon_deg, first.lat_deg);
        for p in iter {
            b.min_lon = b.min_lon.min(p.lon_deg);
            b.min_lat = b.min_lat.min(p.lat_deg);
            b.max_lon = b.max_lon.max(p.lon_deg);
            b.max_lat = b.max_lat.max(p.lat_deg);
        }
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::LonLatBounds;
    use crate::geo::LatLon;

    #[test]
    fn bounds_cover_all_points() {
        let pts = [
            LatLon::new(36.75, 6.24),
            LatLon::new(-23.5, -46.6),
            LatLon::new(51.4, 7.0),
        ];
        let b = LonLatBounds::from_points(pts).unwrap();
        assert_eq!(b, LonLatBounds::new(-46.6, -23.5, 7.0, 51.4));
    }

    #[test]
    fn no_points_no_bounds() {
        assert_eq!(LonLatBounds::from_points(Vec::new()), None);
    }
}
