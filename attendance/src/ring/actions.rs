//! Actions driving the profile ring.

use crate::types::UserProfile;
use serde::{Deserialize, Serialize};

/// Inputs to the ring reducer.
///
/// Seeding comes from the session once hydration completes; navigation comes
/// from taps (explicit index selection) and drag releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RingAction {
    /// Replace the ring contents with a hydrated profile sequence.
    ///
    /// A non-empty sequence activates the ring at index 0; an empty one
    /// leaves it empty ("no attendees to show").
    Seed {
        /// Ordered, deduplicated profiles.
        profiles: Vec<UserProfile>,
    },

    /// Move forward one profile, wrapping past the end.
    Advance,

    /// Move backward one profile, wrapping past the front.
    Retreat,

    /// Jump directly to an index, e.g. from a thumbnail strip tap.
    JumpTo {
        /// Target index, `0 <= index < len`.
        index: usize,
    },

    /// A drag gesture was released.
    GestureReleased {
        /// Final displacement along the navigation axis, in px-equivalent
        /// units. Sign encodes drag direction.
        displacement: f32,
    },
}
