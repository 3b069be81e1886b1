//! Session facade over the store runtime.

use crate::error::AttendanceError;
use crate::grouping::{self, MonthBucket, MonthKey};
use crate::ring::{RingAction, RingPosition, RingState};
use crate::session::actions::SessionAction;
use crate::session::environment::SessionEnvironment;
use crate::session::reducer::LiveAttendanceReducer;
use crate::session::types::{PresentationStatus, SessionState};
use crate::types::{EventId, LiveEvent, UserId};
use encore_runtime::{EffectHandle, Store, StoreError};
use std::time::Duration;
use tokio::sync::broadcast;

/// One viewing session over the attendee-matching core.
///
/// Wraps a [`Store`] running the session reducer and exposes the operations
/// the presentation layer drives: opening and closing the ring, navigation,
/// and the viewer's month-grouped event list. State transitions can be
/// observed as a stream via [`subscribe`](Self::subscribe).
pub struct LiveAttendanceSession<E>
where
    E: SessionEnvironment + Clone + Send + Sync + 'static,
{
    store: Store<SessionState, SessionAction, E, LiveAttendanceReducer<E>>,
    environment: E,
}

impl<E> LiveAttendanceSession<E>
where
    E: SessionEnvironment + Clone + Send + Sync + 'static,
{
    /// Create a session for a viewer (or an anonymous session).
    #[must_use]
    pub fn new(viewer: Option<UserId>, environment: E) -> Self {
        let store = Store::new(
            SessionState::new(viewer),
            LiveAttendanceReducer::new(),
            environment.clone(),
        );
        Self { store, environment }
    }

    /// Open the attendee ring for an event.
    ///
    /// Kicks off the resolve → order → hydrate → seed pipeline and returns
    /// immediately; observe progress via [`subscribe`](Self::subscribe) or
    /// use [`open_ring_and_wait`](Self::open_ring_and_wait).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the session store is
    /// shutting down.
    pub async fn open_ring(&self, event_id: EventId) -> Result<EffectHandle, StoreError> {
        self.store.send(SessionAction::OpenRing { event_id }).await
    }

    /// Open the attendee ring and wait for the pipeline to finish.
    ///
    /// Returns the ring state once hydration has seeded it or the pipeline
    /// has failed. If the presentation is closed or the cache invalidated
    /// mid-open, the pipeline stops silently and this call times out.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] when no terminal pipeline action
    /// arrives in time, and [`StoreError::ShutdownInProgress`] if the store
    /// is shutting down.
    pub async fn open_ring_and_wait(
        &self,
        event_id: EventId,
        timeout: Duration,
    ) -> Result<RingState, StoreError> {
        let _terminal = self
            .store
            .send_and_wait_for(
                SessionAction::OpenRing { event_id },
                move |action| {
                    matches!(
                        action,
                        SessionAction::ProfilesHydrated { event_id: done, .. }
                        | SessionAction::HydrationFailed { event_id: done, .. }
                        | SessionAction::ResolutionFailed { event_id: done, .. }
                            if *done == event_id
                    )
                },
                timeout,
            )
            .await?;

        Ok(self.ring().await)
    }

    /// Close the active ring presentation.
    ///
    /// Ring state is discarded; any in-flight hydration completes silently.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    pub async fn close_ring(&self) -> Result<(), StoreError> {
        self.store.send(SessionAction::CloseRing).await.map(|_| ())
    }

    /// Advance the ring one profile forward (wrapping).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down. Rejected navigation is recorded in state, not returned here.
    pub async fn advance(&self) -> Result<Option<RingPosition>, StoreError> {
        self.navigate(RingAction::Advance).await
    }

    /// Retreat the ring one profile backward (wrapping).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down. Rejected navigation is recorded in state, not returned here.
    pub async fn retreat(&self) -> Result<Option<RingPosition>, StoreError> {
        self.navigate(RingAction::Retreat).await
    }

    /// Jump the ring to an explicit index.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down. An out-of-range index is recorded in state, not returned here.
    pub async fn jump_to(&self, index: usize) -> Result<Option<RingPosition>, StoreError> {
        self.navigate(RingAction::JumpTo { index }).await
    }

    /// Apply a released drag gesture.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    pub async fn release_gesture(&self, displacement: f32) -> Result<Option<RingPosition>, StoreError> {
        self.navigate(RingAction::GestureReleased { displacement })
            .await
    }

    async fn navigate(&self, action: RingAction) -> Result<Option<RingPosition>, StoreError> {
        self.store.send(SessionAction::Ring(action)).await?;
        Ok(self
            .store
            .state(|s| s.active.as_ref().and_then(|a| a.controller.ring.position()))
            .await)
    }

    /// Reload the viewer's event list.
    ///
    /// Invalidates the attendee cache atomically and refreshes the attended
    /// events. The returned handle completes when the refresh has been
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    pub async fn reload_events(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(SessionAction::ReloadEvents).await
    }

    /// Subscribe to session actions produced by effects.
    ///
    /// Yields every pipeline feedback action (resolution, hydration,
    /// failures), letting a presentation layer render loading and error
    /// states as they happen.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionAction> {
        self.store.subscribe_actions()
    }

    /// Snapshot of the current ring state.
    ///
    /// [`RingState::Empty`] when no presentation is open.
    pub async fn ring(&self) -> RingState {
        self.store
            .state(|s| {
                s.active
                    .as_ref()
                    .map(|a| a.controller.ring.clone())
                    .unwrap_or_default()
            })
            .await
    }

    /// 1-based position display for the current profile, when active.
    pub async fn position(&self) -> Option<RingPosition> {
        self.store
            .state(|s| s.active.as_ref().and_then(|a| a.controller.ring.position()))
            .await
    }

    /// Loading status of the active presentation, if one is open.
    pub async fn status(&self) -> Option<PresentationStatus> {
        self.store
            .state(|s| s.active.as_ref().map(|a| a.status.clone()))
            .await
    }

    /// Most recent recoverable error, for a retry affordance.
    pub async fn last_error(&self) -> Option<AttendanceError> {
        self.store.state(|s| s.last_error.clone()).await
    }

    /// The viewer's attended events from the most recent reload.
    pub async fn my_events(&self) -> Vec<LiveEvent> {
        self.store.state(|s| s.my_events.clone()).await
    }

    /// Month-group the viewer's attended events for progressive disclosure.
    ///
    /// Returns the buckets in first-appearance order plus the keys that
    /// default open, with "today" taken from the environment clock.
    pub async fn grouped_events(&self) -> (Vec<MonthBucket>, Vec<MonthKey>) {
        let today = self.environment.clock().now().date_naive();
        let events = self.my_events().await;
        grouping::group_and_default_open(&events, today)
    }

    /// Shut the session store down, waiting for in-flight effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}
