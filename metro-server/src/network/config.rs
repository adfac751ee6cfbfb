//! Edge-weight configuration for network construction.

use super::error::ConfigurationError;

/// Parameters controlling how transfer edges are created and weighted.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Distance-equivalent cost of changing lines (km).
    /// Added to the search metric for every transfer edge so that
    /// unnecessary line changes are avoided.
    pub transfer_weight_km: f64,

    /// Maximum distance between two stations on different lines for them
    /// to be treated as one interchange (km).
    pub interchange_radius_km: f64,
}

impl NetworkConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_weight_km: f64, interchange_radius_km: f64) -> Self {
        Self {
            transfer_weight_km,
            interchange_radius_km,
        }
    }

    /// Set the transfer weight.
    pub fn with_transfer_weight_km(mut self, km: f64) -> Self {
        self.transfer_weight_km = km;
        self
    }

    /// Set the interchange detection radius.
    pub fn with_interchange_radius_km(mut self, km: f64) -> Self {
        self.interchange_radius_km = km;
        self
    }

    /// Check that both parameters are usable edge weights.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.transfer_weight_km.is_finite() || self.transfer_weight_km < 0.0 {
            return Err(ConfigurationError::InvalidConfig(
                "transfer weight must be a finite non-negative distance",
            ));
        }
        if !self.interchange_radius_km.is_finite() || self.interchange_radius_km < 0.0 {
            return Err(ConfigurationError::InvalidConfig(
                "interchange radius must be a finite non-negative distance",
            ));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            transfer_weight_km: 0.5,
            interchange_radius_km: 0.05, // 50 m
        }
    }
}
