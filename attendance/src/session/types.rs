//! Session state.

use crate::cache::{AttendeeCache, CacheEpoch};
use crate::error::AttendanceError;
use crate::ring::RingControllerState;
use crate::types::{EventId, LiveEvent, UserId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Loading status of the active ring presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationStatus {
    /// Attendees or profiles are being fetched.
    Loading,
    /// The ring is seeded. An empty ring here means "no attendees to show".
    Ready,
    /// Attendee data could not be obtained at all.
    ///
    /// The presentation shows an explicit empty/error state with a retry
    /// affordance, never a stuck loading indicator.
    Failed(AttendanceError),
}

/// One open ring presentation.
///
/// Owned by exactly one session; discarded on close, never cached. Two
/// independent presentations (e.g. opened from a list view and a detail
/// view) each get their own instance and never share controller state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePresentation {
    /// The event whose attendees are being presented.
    pub event_id: EventId,
    /// Loading status.
    pub status: PresentationStatus,
    /// The ring controller for this presentation.
    pub controller: RingControllerState,
}

impl ActivePresentation {
    /// A fresh presentation in the loading state.
    #[must_use]
    pub fn loading(event_id: EventId) -> Self {
        Self {
            event_id,
            status: PresentationStatus::Loading,
            controller: RingControllerState::default(),
        }
    }
}

/// State for the live attendance session reducer.
///
/// Owns the attendee cache for the lifetime of the viewing session. The
/// cache handle is shared with resolver effects; all other mutation happens
/// inside the reducer.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The authenticated viewer's stable id, if any.
    ///
    /// Absent while anonymous or still loading; ordering then applies no
    /// pinning.
    pub viewer: Option<UserId>,
    /// The session-scoped attendee cache.
    cache: Arc<Mutex<AttendeeCache>>,
    /// The currently open ring presentation, if any.
    pub active: Option<ActivePresentation>,
    /// The viewer's own attended events, most recent load.
    pub my_events: Vec<LiveEvent>,
    /// Most recent recoverable error, for a retry affordance.
    pub last_error: Option<AttendanceError>,
}

impl SessionState {
    /// Create session state for a viewer (or an anonymous session).
    #[must_use]
    pub fn new(viewer: Option<UserId>) -> Self {
        Self {
            viewer,
            cache: Arc::new(Mutex::new(AttendeeCache::new())),
            active: None,
            my_events: Vec::new(),
            last_error: None,
        }
    }

    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    fn lock_cache(&self) -> MutexGuard<'_, AttendeeCache> {
        self.cache.lock().unwrap()
    }

    /// Shared handle to the attendee cache, for resolver effects.
    #[must_use]
    pub fn cache_handle(&self) -> Arc<Mutex<AttendeeCache>> {
        Arc::clone(&self.cache)
    }

    /// The cache's current epoch.
    #[must_use]
    pub fn cache_epoch(&self) -> CacheEpoch {
        self.lock_cache().epoch()
    }

    /// Number of cached attendee lists.
    #[must_use]
    pub fn cached_events(&self) -> usize {
        self.lock_cache().len()
    }

    /// Invalidate the attendee cache atomically.
    pub fn invalidate_cache(&self) {
        self.lock_cache().invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_presentation_and_empty_cache() {
        let state = SessionState::new(Some(UserId::new()));
        assert!(state.active.is_none());
        assert_eq!(state.cached_events(), 0);
        assert!(state.my_events.is_empty());
    }

    #[test]
    fn invalidate_bumps_the_epoch() {
        let state = SessionState::new(None);
        let before = state.cache_epoch();
        state.invalidate_cache();
        assert_ne!(state.cache_epoch(), before);
    }
}
