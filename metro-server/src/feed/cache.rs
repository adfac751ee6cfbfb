//! Feed records kept on disk between restarts.
//!
//! A cache file remembers the feed URL its records came from. Pointing the
//! server at a different feed turns the old file into a miss instead of
//! serving another feed's stations.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::client::{FeedClientConfig, StationRecord};
use super::error::FeedError;

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    source_url: String,
    written_at_secs: u64,
    records: Vec<StationRecord>,
}

/// Why the disk cache could not supply records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMiss {
    /// No cache file
    Absent,
    /// The file exists but does not decode
    Unreadable,
    /// Written for a different feed URL
    OtherSource,
    /// Older than the TTL
    Stale,
    /// Holds no records
    Empty,
}

impl std::fmt::Display for CacheMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            CacheMiss::Absent => "no cache file",
            CacheMiss::Unreadable => "cache file unreadable",
            CacheMiss::OtherSource => "cache written for another feed",
            CacheMiss::Stale => "cache expired",
            CacheMiss::Empty => "cache holds no records",
        };
        f.write_str(reason)
    }
}

/// Where the feed cache lives and which feed it belongs to.
#[derive(Debug, Clone)]
pub struct FeedCacheConfig {
    pub path: PathBuf,
    /// Feed URL the cached records must come from
    pub source_url: String,
    pub ttl: Duration,
}

impl FeedCacheConfig {
    /// Cache for the feed at `source_url`, valid for 24 hours.
    pub fn new(path: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_url: source_url.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for FeedCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json", FeedClientConfig::default().url)
    }
}

#[derive(Debug, Clone)]
pub struct FeedCache {
    config: FeedCacheConfig,
}

impl FeedCache {
    pub fn new(config: FeedCacheConfig) -> Self {
        Self { config }
    }

    /// Records from the cache file, if it is fresh, non-empty and was
    /// written for the configured feed.
    pub fn load(&self) -> Result<Vec<StationRecord>, CacheMiss> {
        let contents = match std::fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CacheMiss::Absent),
            Err(_) => return Err(CacheMiss::Unreadable),
        };
        let file: CacheFile =
            serde_json::from_str(&contents).map_err(|_| CacheMiss::Unreadable)?;

        if file.source_url != self.config.source_url {
            return Err(CacheMiss::OtherSource);
        }
        let age_secs = unix_now()
            .ok_or(CacheMiss::Stale)?
            .saturating_sub(file.written_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return Err(CacheMiss::Stale);
        }
        if file.records.is_empty() {
            return Err(CacheMiss::Empty);
        }

        Ok(file.records)
    }

    /// Write `records` as fetched from the configured feed, creating the
    /// parent directory if needed.
    pub fn save(&self, records: &[StationRecord]) -> Result<(), FeedError> {
        let written_at_secs = unix_now().ok_or_else(|| FeedError::Cache {
            message: "system clock is before 1970".to_string(),
        })?;
        let file = CacheFile {
            source_url: self.config.source_url.clone(),
            written_at_secs,
            records: records.to_vec(),
        };

        if let Some(dir) = self.config.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| FeedError::Cache {
                message: format!("cannot create {}: {e}", dir.display()),
            })?;
        }

        let json = serde_json::to_string(&file).map_err(|e| FeedError::Cache {
            message: format!("cannot encode records: {e}"),
        })?;
        std::fs::write(&self.config.path, json).map_err(|e| FeedError::Cache {
            message: format!("cannot write {}: {e}", self.config.path.display()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}
