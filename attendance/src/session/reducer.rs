//! Reducer orchestrating the attendee-matching pipeline.
//!
//! Data flow per event selection: resolve raw attendee identifiers
//! (cache-checked) → order with the viewer pinned first → hydrate to
//! profiles → seed the ring at position 0. Each asynchronous step is an
//! [`Effect::Future`] whose feedback action carries the cache epoch observed
//! at issue time; arrivals are checked against the current epoch and the
//! active presentation before they touch state.

use crate::cache::CacheEpoch;
use crate::error::NavigationError;
use crate::loader::ProfileLoader;
use crate::ordering;
use crate::resolver::AttendeeResolver;
use crate::ring::{RingEnvironment, RingReducer};
use crate::session::actions::SessionAction;
use crate::session::environment::SessionEnvironment;
use crate::session::types::{ActivePresentation, PresentationStatus, SessionState};
use crate::types::EventId;
use encore_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Reducer for the live attendance session.
///
/// Generic over the environment type so production wiring and test mocks
/// share one implementation.
#[derive(Debug, Clone, Copy)]
pub struct LiveAttendanceReducer<E> {
    _phantom: std::marker::PhantomData<E>,
}

impl<E> LiveAttendanceReducer<E> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<E> Default for LiveAttendanceReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> LiveAttendanceReducer<E> {
    /// Stale-result guard for fetch feedback.
    ///
    /// A result is applied only when its issuing epoch is still the cache's
    /// current epoch AND its event is still the active presentation. Stale
    /// arrivals are discarded silently, as are arrivals for a presentation
    /// that has been closed or replaced.
    fn is_current(state: &SessionState, event_id: EventId, epoch: CacheEpoch) -> bool {
        if state.cache_epoch() != epoch {
            tracing::debug!(%event_id, %epoch, "discarding stale result: cache epoch mismatch");
            return false;
        }
        let active = state
            .active
            .as_ref()
            .is_some_and(|active| active.event_id == event_id);
        if !active {
            tracing::debug!(%event_id, "discarding result: presentation closed or replaced");
        }
        active
    }
}

impl<E> Reducer for LiveAttendanceReducer<E>
where
    E: SessionEnvironment + 'static,
{
    type State = SessionState;
    type Action = SessionAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            SessionAction::OpenRing { event_id } => {
                tracing::debug!(%event_id, "opening attendee ring");
                state.last_error = None;
                state.active = Some(ActivePresentation::loading(event_id));

                let resolver = AttendeeResolver::new(state.cache_handle(), env.attendance());
                smallvec![Effect::future(async move {
                    let resolution = resolver.resolve(event_id).await;
                    let action = match resolution.error {
                        Some(error) => SessionAction::ResolutionFailed {
                            event_id,
                            epoch: resolution.epoch,
                            error,
                        },
                        None => SessionAction::AttendeesResolved {
                            event_id,
                            epoch: resolution.epoch,
                            ids: resolution.ids,
                        },
                    };
                    Some(action)
                })]
            },

            SessionAction::CloseRing => {
                tracing::debug!("closing attendee ring");
                // In-flight fetches for this presentation now fail the
                // active-event guard and complete silently.
                state.active = None;
                SmallVec::new()
            },

            SessionAction::ReloadEvents => {
                // Invalidate before any new resolution can be attempted;
                // in-flight results from the old epoch can no longer be
                // written back.
                state.invalidate_cache();

                let Some(viewer) = state.viewer else {
                    return SmallVec::new();
                };
                let events = env.events();
                smallvec![Effect::future(async move {
                    let action = match events.events_attended_by(viewer).await {
                        Ok(events) => SessionAction::EventsLoaded { events },
                        Err(err) => SessionAction::EventsLoadFailed {
                            error: crate::error::AttendanceError::TransientFetchFailure(
                                err.to_string(),
                            ),
                        },
                    };
                    Some(action)
                })]
            },

            SessionAction::Ring(ring_action) => {
                match state.active.as_mut() {
                    Some(active) => {
                        let _ = RingReducer::new().reduce(
                            &mut active.controller,
                            ring_action,
                            &RingEnvironment,
                        );
                        // Mirror rejected navigation for the session surface.
                        state.last_error = active.controller.last_error.map(Into::into);
                    },
                    None => {
                        tracing::debug!("navigation with no open presentation");
                        state.last_error = Some(NavigationError::EmptyRing.into());
                    },
                }
                SmallVec::new()
            },

            // ========== Feedback events ==========
            SessionAction::AttendeesResolved {
                event_id,
                epoch,
                ids,
            } => {
                if !Self::is_current(state, event_id, epoch) {
                    return SmallVec::new();
                }

                let ordered = ordering::order(&ids, state.viewer);
                let loader = ProfileLoader::new(env.profiles());
                smallvec![Effect::future(async move {
                    let action = match loader.hydrate(&ordered).await {
                        Ok(profiles) => SessionAction::ProfilesHydrated {
                            event_id,
                            epoch,
                            profiles,
                        },
                        Err(error) => SessionAction::HydrationFailed {
                            event_id,
                            epoch,
                            error,
                        },
                    };
                    Some(action)
                })]
            },

            SessionAction::ProfilesHydrated {
                event_id,
                epoch,
                profiles,
            } => {
                if !Self::is_current(state, event_id, epoch) {
                    return SmallVec::new();
                }
                if let Some(active) = state.active.as_mut() {
                    tracing::debug!(%event_id, count = profiles.len(), "ring seeded");
                    active.controller.ring.seed(profiles);
                    active.controller.last_error = None;
                    active.status = PresentationStatus::Ready;
                }
                SmallVec::new()
            },

            SessionAction::ResolutionFailed {
                event_id,
                epoch,
                error,
            }
            | SessionAction::HydrationFailed {
                event_id,
                epoch,
                error,
            } => {
                if !Self::is_current(state, event_id, epoch) {
                    return SmallVec::new();
                }
                if let Some(active) = state.active.as_mut() {
                    tracing::warn!(%event_id, %error, "attendee pipeline failed");
                    active.status = PresentationStatus::Failed(error.clone());
                }
                state.last_error = Some(error);
                SmallVec::new()
            },

            SessionAction::EventsLoaded { events } => {
                tracing::debug!(count = events.len(), "attended events loaded");
                state.my_events = events;
                SmallVec::new()
            },

            SessionAction::EventsLoadFailed { error } => {
                tracing::warn!(%error, "attended events load failed");
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
