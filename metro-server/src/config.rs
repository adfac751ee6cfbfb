//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::feed::{FeedCacheConfig, FeedClientConfig};
use crate::network::NetworkConfig;
use crate::planner::PlannerConfig;

const DEFAULT_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_STATIC_DIR: &str = "frontend";
const DEFAULT_FEED_CACHE: &str = "stations_cache.json";

/// An environment variable that could not be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct InvalidSetting {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`METRO_ADDR`)
    pub addr: SocketAddr,
    /// Frontend directory (`METRO_STATIC_DIR`)
    pub static_dir: String,
    /// Feed client settings (`METRO_FEED_URL`)
    pub feed: FeedClientConfig,
    /// Feed disk cache (`METRO_FEED_CACHE`)
    pub feed_cache: FeedCacheConfig,
    /// Network build settings (`METRO_TRANSFER_KM`)
    pub network: NetworkConfig,
    /// Travel-time model (`METRO_SPEED_KMH`, `METRO_DWELL_MINUTES`)
    pub planner: PlannerConfig,
    /// Skip the upstream fetch (`METRO_OFFLINE`)
    pub offline: bool,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, InvalidSetting> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvalidSetting>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr_text = get("METRO_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_text.trim().parse().map_err(|_| InvalidSetting {
            var: "METRO_ADDR",
            value: addr_text.clone(),
            reason: "expected host:port",
        })?;

        let static_dir = get("METRO_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let mut feed = FeedClientConfig::new();
        if let Some(url) = get("METRO_FEED_URL") {
            feed = feed.with_url(url);
        }

        let feed_cache = FeedCacheConfig::new(
            PathBuf::from(get("METRO_FEED_CACHE").unwrap_or_else(|| DEFAULT_FEED_CACHE.to_string())),
            feed.url.clone(),
        );

        let mut network = NetworkConfig::default();
        if let Some(text) = get("METRO_TRANSFER_KM") {
            let km: f64 = text.trim().parse().map_err(|_| InvalidSetting {
                var: "METRO_TRANSFER_KM",
                value: text.clone(),
                reason: "expected a number of kilometres",
            })?;
            network = network.with_transfer_weight_km(km);
            network.validate().map_err(|_| InvalidSetting {
                var: "METRO_TRANSFER_KM",
                value: text.clone(),
                reason: "must be finite and non-negative",
            })?;
        }

        let mut planner = PlannerConfig::default();
        if let Some(text) = get("METRO_SPEED_KMH") {
            planner.average_speed_kmh = parse_number("METRO_SPEED_KMH", &text)?;
            planner.validate().map_err(|_| InvalidSetting {
                var: "METRO_SPEED_KMH",
                value: text.clone(),
                reason: "must be a positive speed",
            })?;
        }
        if let Some(text) = get("METRO_DWELL_MINUTES") {
            planner.dwell_minutes = parse_number("METRO_DWELL_MINUTES", &text)?;
            planner.validate().map_err(|_| InvalidSetting {
                var: "METRO_DWELL_MINUTES",
                value: text.clone(),
                reason: "must be finite and non-negative",
            })?;
        }

        let offline = match get("METRO_OFFLINE") {
            None => false,
            Some(text) => parse_flag(&text).ok_or(InvalidSetting {
                var: "METRO_OFFLINE",
                value: text.clone(),
                reason: "expected true/false",
            })?,
        };

        Ok(Self {
            addr,
            static_dir,
            feed,
            feed_cache,
            network,
            planner,
            offline,
        })
    }
}

fn parse_number(var: &'static str, text: &str) -> Result<f64, InvalidSetting> {
    text.trim().parse().map_err(|_| InvalidSetting {
        var,
        value: text.to_string(),
        reason: "expected a number",
    })
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
