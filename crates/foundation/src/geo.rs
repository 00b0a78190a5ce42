/// Geographic position in decimal degrees (WGS84).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLon {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl LatLon {
    pub const ORIGIN: LatLon = LatLon {
        lat_deg: 0.0,
        lon_deg: 0.0,
    };

    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Arithmetic mean of latitudes and of longitudes.
    ///
    /// This is not a spherical centroid; it matches how map widgets pick an
    /// initial camera center. Returns `None` for an empty input.
    pub fn mean<I>(points: I) -> Option<LatLon>
    where
        I: IntoIterator<Item = LatLon>,
    {
        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        let mut n = 0usize;
        for p in points {
            lat_sum += p.lat_deg;
            lon_sum += p.lon_deg;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(LatLon::new(lat_sum / n as f64, lon_sum / n as f64))
    }
}
