//! Travel-time configuration for the route planner.

/// Error returned when planner parameters cannot produce travel times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid planner config: {reason}")]
pub struct InvalidPlannerConfig {
    reason: &'static str,
}

/// Parameters used to turn segment distances into travel times.
///
/// Times are an approximation, not schedule data: every hop, transfers
/// included, costs `distance / speed` plus one dwell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Average train speed between stations (km/h).
    pub average_speed_kmh: f64,

    /// Time added per hop for stopping, boarding or interchanging (minutes).
    pub dwell_minutes: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(average_speed_kmh: f64, dwell_minutes: f64) -> Self {
        Self {
            average_speed_kmh,
            dwell_minutes,
        }
    }

    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), InvalidPlannerConfig> {
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(InvalidPlannerConfig {
                reason: "average speed must be positive",
            });
        }
        if !self.dwell_minutes.is_finite() || self.dwell_minutes < 0.0 {
            return Err(InvalidPlannerConfig {
                reason: "dwell time must not be negative",
            });
        }
        Ok(())
    }

    /// Travel time for one hop of the given length, in minutes.
    pub fn segment_minutes(&self, distance_km: f64) -> f64 {
        distance_km / self.average_speed_kmh * 60.0 + self.dwell_minutes
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 40.0,
            dwell_minutes: 1.0,
        }
    }
}
