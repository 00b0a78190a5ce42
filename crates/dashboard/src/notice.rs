use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The filter matched nothing; no views are rendered for this request.
    EmptyFilterResult,
    /// No row has a parseable capacity; the capacity range control is inert.
    NoCapacityData,
    /// Nothing left with both a capacity and a location; only the map is replaced.
    NoPlottableRows,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A user-facing, non-fatal condition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub severity: Severity,
    pub message: &'static str,
}

impl Notice {
    pub const fn new(kind: NoticeKind) -> Self {
        let (severity, message) = match kind {
            NoticeKind::EmptyFilterResult => (
                Severity::Error,
                "No steel plants match the selected filters. Please adjust your selections.",
            ),
            NoticeKind::NoCapacityData => (Severity::Warning, "No valid capacity data available."),
            NoticeKind::NoPlottableRows => (
                Severity::Warning,
                "No plants with valid capacity and coordinates to display on the map.",
            ),
        };
        Self {
            kind,
            severity,
            message,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}
