//! Unvalidated network input, as handed over by the feed layer.

/// A station record exactly as the upstream feed describes it.
///
/// Nothing here is trusted yet: coordinates are still the feed's decimal
/// strings and the line label has not been parsed. Validation happens once,
/// in [`MetroNetwork::build`](super::MetroNetwork::build).
#[derive(Debug, Clone, PartialEq)]
pub struct RawStation {
    pub id: i64,
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub line: String,
    pub order: u32,
}

impl RawStation {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        line: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            line: line.into(),
            order,
        }
    }
}

/// A line record: code, color and the ids of its stations in track order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    pub code: String,
    pub color: String,
    pub station_ids: Vec<i64>,
}

impl RawLine {
    pub fn new(code: impl Into<String>, color: impl Into<String>, station_ids: Vec<i64>) -> Self {
        Self {
            code: code.into(),
            color: color.into(),
            station_ids,
        }
    }
}

/// Everything needed to build a [`MetroNetwork`](super::MetroNetwork).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSnapshot {
    pub stations: Vec<RawStation>,
    pub lines: Vec<RawLine>,
}

impl NetworkSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from per-line ordered station lists.
    ///
    /// Each entry is `(code, color, stations)`. The line's id sequence is
    /// taken from the order of `stations`, and every record is added to the
    /// station set.
    pub fn from_line_lists<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (String, String, Vec<RawStation>)>,
    {
        let mut snapshot = Self::new();
        for (code, color, stations) in lines {
            snapshot.push_line(code, color, stations);
        }
        snapshot
    }

    /// Append a line together with its station records.
    pub fn push_line(
        &mut self,
        code: impl Into<String>,
        color: impl Into<String>,
        stations: Vec<RawStation>,
    ) {
        let ids = stations.iter().map(|s| s.id).collect();
        self.lines.push(RawLine::new(code, color, ids));
        self.stations.extend(stations);
    }

    /// Number of station records (including records that share an id).
    pub fn station_records(&self) -> usize {
        self.stations.len()
    }
}
