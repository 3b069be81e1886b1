//! Gesture classification.
//!
//! Decoupled from rendering: a drag release is reduced to its displacement
//! along the navigation axis, and this module decides whether that means a
//! page turn. Animation direction is a display concern derived from the
//! resulting state transition, not the other way around.

/// Displacement (in px-equivalent units) a drag must exceed to navigate.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// What a released gesture means for the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Move to the next profile.
    Advance,
    /// Move to the previous profile.
    Retreat,
    /// Displacement stayed within the threshold; nothing happens.
    None,
}

/// Classify a released drag by its displacement along the navigation axis.
///
/// A leftward drag (negative displacement) past the threshold pulls in the
/// next profile; a rightward drag past the threshold reveals the previous
/// one. The displacement must strictly exceed [`SWIPE_THRESHOLD`] in
/// magnitude - a release exactly at the threshold is a no-op.
#[must_use]
pub fn classify_gesture(displacement: f32) -> GestureOutcome {
    if displacement < -SWIPE_THRESHOLD {
        GestureOutcome::Advance
    } else if displacement > SWIPE_THRESHOLD {
        GestureOutcome::Retreat
    } else {
        GestureOutcome::None
    }
}
