use layers::DEFAULT_MAP_STYLE;

/// Knobs that shape the rendered view but not the data.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// How many owners (in sorted order) the owner control starts with.
    pub default_owner_count: usize,
    pub map_style: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_owner_count: 10,
            map_style: DEFAULT_MAP_STYLE.to_string(),
        }
    }
}
