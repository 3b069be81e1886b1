//! Data-service ports.
//!
//! The attendance core is storage- and transport-agnostic: persistent
//! storage, its query language, and authentication are external
//! collaborators reached through these traits. Production implementations
//! wrap the hosted backend; this workspace ships in-memory mocks (see
//! [`crate::mocks`]).

use crate::types::{AttendanceRecord, EventId, Handle, Identifier, LiveEvent, UserId, UserProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a data service.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ServiceError {
    /// The backend could not be reached or answered with an error.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The requested handle is already taken by another user.
    ///
    /// Authoritative: the uniqueness check lives in the external store, and
    /// callers must treat this as terminal rather than retry.
    #[error("handle already taken: {0}")]
    HandleTaken(Handle),
}

/// Attendance records for live events.
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// All attendance records for one event, in backend-returned order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] on backend failure.
    async fn attendance_for(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AttendanceRecord>, ServiceError>;
}

/// Profile lookups and edits.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetch a profile by internal id or public handle.
    ///
    /// Returns `Ok(None)` when no user matches the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] on backend failure.
    async fn fetch_profile(&self, id: &Identifier) -> Result<Option<UserProfile>, ServiceError>;

    /// Persist profile edits.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::HandleTaken`] when the profile's handle
    /// collides with another user's, and [`ServiceError::Unavailable`] on
    /// backend failure.
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), ServiceError>;
}

/// Event lookups for the viewer's own list.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Events the given user has attended.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] on backend failure.
    async fn events_attended_by(&self, user_id: UserId) -> Result<Vec<LiveEvent>, ServiceError>;
}
