//! # Encore Attendance
//!
//! Attendee matching and profile ring presentation for live events.
//!
//! Given an event, this crate resolves the distinct set of users who
//! attended it, orders them deterministically with the viewing user pinned
//! first, hydrates them into full profiles, and drives a swipeable,
//! cancellable, cache-backed presentation ring over the result. It also
//! groups the viewer's own event list by calendar month for progressive
//! disclosure.
//!
//! ## Components
//!
//! - [`resolver::AttendeeResolver`] - per-event attendee resolution,
//!   memoized in an epoch-tagged session cache
//! - [`ordering::order`] - pure viewer-pinned ordering policy
//! - [`loader::ProfileLoader`] - concurrent, order-preserving profile
//!   hydration with dedup by stable identity
//! - [`ring`] - the cyclic presentation state machine with wraparound and
//!   gesture classification
//! - [`grouping`] - calendar month bucketing and the default-open policy
//! - [`session`] - the composition root tying the pipeline together over a
//!   reducer and store
//!
//! Persistent storage, authentication, image pipelines, and routing are
//! external collaborators behind the trait ports in [`services`].

pub mod cache;
pub mod error;
pub mod grouping;
pub mod loader;
pub mod mocks;
pub mod ordering;
pub mod resolver;
pub mod ring;
pub mod services;
pub mod session;
pub mod types;

pub use cache::{AttendeeCache, CacheEpoch};
pub use error::{AttendanceError, NavigationError, ProfileValidationError};
pub use grouping::{MonthBucket, MonthKey, default_open_months, group_and_default_open, group_by_month};
pub use loader::ProfileLoader;
pub use resolver::{AttendeeResolver, Resolution};
pub use ring::{
    GestureOutcome, NavDirection, RingAction, RingPosition, RingState, SWIPE_THRESHOLD,
    classify_gesture,
};
pub use services::{AttendanceService, EventService, ProfileService, ServiceError};
pub use session::{
    ActivePresentation, LiveAttendanceSession, PresentationStatus, SessionAction, SessionState,
};
pub use types::{
    AttendanceRecord, EventId, Handle, Identifier, LiveEvent, SocialLinks, UserId, UserProfile,
};
