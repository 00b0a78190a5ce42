use formats::Facility;

/// RGBA, 0..=255 per channel.
pub type Rgba = [u8; 4];

pub const MARKER_ALPHA: u8 = 160;

/// Color for regions missing from [`REGION_PALETTE`].
pub const FALLBACK_COLOR: Rgba = [128, 128, 128, MARKER_ALPHA];

pub const REGION_PALETTE: [(&str, Rgba); 7] = [
    ("Asia Pacific", [250, 0, 0, MARKER_ALPHA]),
    ("Europe", [0, 128, 255, MARKER_ALPHA]),
    ("Africa", [0, 200, 0, MARKER_ALPHA]),
    ("North America", [255, 165, 0, MARKER_ALPHA]),
    ("Middle East", [255, 220, 0, MARKER_ALPHA]),
    ("Central & South America", [160, 32, 240, MARKER_ALPHA]),
    ("Eurasia", [255, 105, 180, MARKER_ALPHA]),
];

/// Marker radius per Mtpa of capacity, in metres.
pub const RADIUS_PER_MTPA_M: f64 = 20_000.0;
pub const MIN_RADIUS_M: f64 = 5_000.0;
pub const MAX_RADIUS_M: f64 = 80_000.0;

/// Palette lookup; surrounding whitespace in the region name is ignored.
pub fn region_color(region: Option<&str>) -> Rgba {
    let Some(region) = region.map(str::trim) else {
        return FALLBACK_COLOR;
    };
    REGION_PALETTE
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Linear in capacity, clamped so tiny and huge plants stay legible.
pub fn marker_radius_m(capacity_mtpa: f64) -> f64 {
    (capacity_mtpa * RADIUS_PER_MTPA_M).clamp(MIN_RADIUS_M, MAX_RADIUS_M)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius_m: f64,
    pub color: Rgba,
}

impl MarkerStyle {
    /// `None` for plants without a known capacity; they have no marker size.
    pub fn for_facility(facility: &Facility) -> Option<Self> {
        let capacity = facility.capacity_mtpa?;
        Some(Self {
            radius_m: marker_radius_m(capacity),
            color: region_color(facility.region.as_deref()),
        })
    }
}
