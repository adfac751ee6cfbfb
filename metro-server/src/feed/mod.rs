//! Station data from the Metro Istanbul feed.
//!
//! The feed is loaded once at startup: from the disk cache when it is fresh,
//! otherwise from upstream. When neither is available the network is built
//! from the built-in fallback lines alone.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod corrections;
pub mod error;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::Coordinates;
use crate::network::{NetworkSnapshot, RawStation};

pub use cache::{CacheMiss, FeedCache, FeedCacheConfig};
pub use client::{FeedClient, FeedClientConfig, StationRecord};
pub use error::FeedError;

/// Where the records behind a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Cache,
    Upstream,
    Fallback,
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SnapshotSource::Cache => "cache",
            SnapshotSource::Upstream => "upstream",
            SnapshotSource::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: NetworkSnapshot,
    pub source: SnapshotSource,
}

/// Load the network snapshot.
///
/// `client` is `None` in offline mode. Upstream failures are logged and
/// never fatal: the built-in fallback lines are always available.
pub async fn load_snapshot(client: Option<&FeedClient>, cache: &FeedCache) -> LoadedSnapshot {
    match cache.load() {
        Ok(records) => {
            info!(
                path = %cache.path().display(),
                records = records.len(),
                "using cached station feed"
            );
            return LoadedSnapshot {
                snapshot: snapshot_from_records(&records),
                source: SnapshotSource::Cache,
            };
        }
        Err(miss) => debug!(path = %cache.path().display(), %miss, "station feed cache not used"),
    }

    let Some(client) = client else {
        info!("offline mode, using fallback station data");
        return LoadedSnapshot {
            snapshot: snapshot_from_records(&[]),
            source: SnapshotSource::Fallback,
        };
    };

    match client.fetch_all().await {
        Ok(records) if !records.is_empty() => {
            info!(records = records.len(), "fetched station feed");
            if let Err(e) = cache.save(&records) {
                warn!(error = %e, "failed to write station feed cache");
            }
            LoadedSnapshot {
                snapshot: snapshot_from_records(&records),
                source: SnapshotSource::Upstream,
            }
        }
        Ok(_) => {
            warn!("station feed returned no records, using fallback data");
            LoadedSnapshot {
                snapshot: snapshot_from_records(&[]),
                source: SnapshotSource::Fallback,
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch station feed, using fallback data");
            LoadedSnapshot {
                snapshot: snapshot_from_records(&[]),
                source: SnapshotSource::Fallback,
            }
        }
    }
}

/// Group feed records into catalog lines and apply corrections.
///
/// Records keep their feed order within a line. Records for lines outside
/// the catalog are ignored, as are records whose coordinates do not parse;
/// every catalog line is present in the result, possibly empty.
pub fn snapshot_from_records(records: &[StationRecord]) -> NetworkSnapshot {
    let mut lines: HashMap<String, Vec<RawStation>> = HashMap::new();
    let mut ignored = 0usize;

    for record in records {
        if catalog::color_of(&record.line_name).is_none() {
            ignored += 1;
            continue;
        }
        lines
            .entry(record.line_name.clone())
            .or_default()
            .push(raw_station(record));
    }
    if ignored > 0 {
        debug!(ignored, "skipped records for lines outside the catalog");
    }

    corrections::apply(&mut lines);

    let mut snapshot = NetworkSnapshot::new();
    for &(code, color) in catalog::LINES {
        let mut stations = lines.remove(code).unwrap_or_default();
        stations.retain(|station| {
            let valid = Coordinates::parse(&station.latitude, &station.longitude).is_ok();
            if !valid {
                warn!(
                    station = station.id,
                    name = %station.name,
                    line = code,
                    "dropping feed record without usable coordinates"
                );
            }
            valid
        });
        snapshot.push_line(code, color, stations);
    }
    snapshot
}

fn raw_station(record: &StationRecord) -> RawStation {
    RawStation::new(
        record.id,
        record.name.clone(),
        record.detail_info.latitude.clone(),
        record.detail_info.longitude.clone(),
        record.line_name.clone(),
        record.order,
    )
}
