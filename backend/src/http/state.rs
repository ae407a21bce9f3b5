//! Application state for the HTTP server.

use crate::config::AppConfig;
use crate::scheduler::ScheduleConfig;

/// Shared application state passed to all handlers.
///
/// Holds configuration only: every request computes its schedule and report
/// from its own inputs.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Scheduler policy applied to every request
    pub schedule: ScheduleConfig,
}

impl AppState {
    /// Create a new application state with the given scheduler policy.
    pub fn new(schedule: ScheduleConfig) -> Self {
        Self { schedule }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.schedule_config())
    }
}
