//! Environment trait for the session reducer.

use crate::services::{AttendanceService, EventService, ProfileService};
use encore_core::environment::Clock;
use std::sync::Arc;

/// Dependencies injected into the session reducer.
///
/// Accessors return owned `Arc`s so fetch effects can move the service into
/// their spawned task.
pub trait SessionEnvironment: Send + Sync {
    /// Attendance record lookups.
    fn attendance(&self) -> Arc<dyn AttendanceService>;

    /// Profile lookups.
    fn profiles(&self) -> Arc<dyn ProfileService>;

    /// Attended-event lookups for the viewer's own list.
    fn events(&self) -> Arc<dyn EventService>;

    /// Clock for "today" in month grouping.
    fn clock(&self) -> Arc<dyn Clock>;
}

/// Production environment wiring concrete services.
#[derive(Clone)]
pub struct ProductionSessionEnvironment {
    attendance: Arc<dyn AttendanceService>,
    profiles: Arc<dyn ProfileService>,
    events: Arc<dyn EventService>,
    clock: Arc<dyn Clock>,
}

impl ProductionSessionEnvironment {
    /// Create an environment from service implementations.
    #[must_use]
    pub fn new(
        attendance: Arc<dyn AttendanceService>,
        profiles: Arc<dyn ProfileService>,
        events: Arc<dyn EventService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            attendance,
            profiles,
            events,
            clock,
        }
    }
}

impl SessionEnvironment for ProductionSessionEnvironment {
    fn attendance(&self) -> Arc<dyn AttendanceService> {
        Arc::clone(&self.attendance)
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        Arc::clone(&self.profiles)
    }

    fn events(&self) -> Arc<dyn EventService> {
        Arc::clone(&self.events)
    }

    fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}
