//! Profile ring: the swipeable, cyclic presentation over hydrated attendee
//! profiles for one event.
//!
//! The ring is a pure state machine driven by [`RingAction`]s: seeding,
//! explicit navigation, and gesture releases. Wraparound is mandatory in
//! both directions; a single-element ring stays put; invalid navigation is
//! rejected with state unchanged. Navigation direction only selects a
//! transition's visual orientation - it carries no semantic weight.

pub mod actions;
pub mod gesture;
pub mod reducer;
pub mod types;

pub use actions::RingAction;
pub use gesture::{GestureOutcome, SWIPE_THRESHOLD, classify_gesture};
pub use reducer::{RingControllerState, RingEnvironment, RingReducer};
pub use types::{NavDirection, RingPosition, RingState};
