//! The lines served by the planner and their display colors.

/// Served lines in display order, with their colors.
///
/// Feed records for any other line are ignored.
pub const LINES: &[(&str, &str)] = &[
    ("M5", "#E63946"),
    ("M4", "#1D3557"),
    ("M8", "#2A9D8F"),
    ("MM", "#9D4EDD"),
    ("M2", "#F77F00"),
    ("M7", "#06AED5"),
    ("M3", "#8B4513"),
    ("T1", "#FF69B4"),
    ("T5", "#FFD700"),
    ("M1A", "#6C757D"),
    ("M1B", "#E83283"),
    ("M6", "#90EE90"),
    ("M9", "#008080"),
    ("M11", "#4B0082"),
    ("T4", "#800000"),
    ("F1", "#000080"),
    ("F4", "#808000"),
];

/// Color of a served line, if it is one.
pub fn color_of(code: &str) -> Option<&'static str> {
    LINES.iter().find(|(c, _)| *c == code).map(|(_, color)| *color)
}
