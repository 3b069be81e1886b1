//! Actions for the live attendance session.

use crate::cache::CacheEpoch;
use crate::error::AttendanceError;
use crate::ring::RingAction;
use crate::types::{EventId, Identifier, LiveEvent, UserProfile};
use serde::{Deserialize, Serialize};

/// Inputs to the session reducer: commands from the presentation layer and
/// the feedback events produced by fetch effects.
///
/// Every feedback event carries the `(event, epoch)` pair observed when its
/// fetch was issued; the reducer discards results whose epoch has been
/// invalidated or whose event is no longer the active presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionAction {
    // ========== Commands ==========
    /// Open the attendee ring for an event.
    ///
    /// Starts the resolve → order → hydrate → seed pipeline.
    OpenRing {
        /// The selected event.
        event_id: EventId,
    },

    /// Close the active ring presentation.
    ///
    /// Ring state is discarded; in-flight fetches complete silently without
    /// touching presentation state.
    CloseRing,

    /// The enclosing event list is reloading.
    ///
    /// Invalidates the attendee cache atomically and refreshes the viewer's
    /// attended-events list.
    ReloadEvents,

    /// Navigation delegated to the ring controller.
    Ring(RingAction),

    // ========== Feedback events ==========
    /// Attendee identifiers resolved for an event.
    AttendeesResolved {
        /// The resolved event.
        event_id: EventId,
        /// Cache epoch observed when the fetch was issued.
        epoch: CacheEpoch,
        /// Raw attendee identifiers in backend order.
        ids: Vec<Identifier>,
    },

    /// Attendee resolution failed.
    ResolutionFailed {
        /// The event whose resolution failed.
        event_id: EventId,
        /// Cache epoch observed when the fetch was issued.
        epoch: CacheEpoch,
        /// The recoverable failure.
        error: AttendanceError,
    },

    /// Ordered attendee profiles hydrated for an event.
    ProfilesHydrated {
        /// The hydrated event.
        event_id: EventId,
        /// Cache epoch observed when the pipeline was issued.
        epoch: CacheEpoch,
        /// Ordered, deduplicated profiles.
        profiles: Vec<UserProfile>,
    },

    /// Profile hydration failed entirely.
    HydrationFailed {
        /// The event whose hydration failed.
        event_id: EventId,
        /// Cache epoch observed when the pipeline was issued.
        epoch: CacheEpoch,
        /// The recoverable failure.
        error: AttendanceError,
    },

    /// The viewer's attended events were loaded.
    EventsLoaded {
        /// Events attended by the viewer.
        events: Vec<LiveEvent>,
    },

    /// Loading the viewer's attended events failed.
    EventsLoadFailed {
        /// The recoverable failure.
        error: AttendanceError,
    },
}
