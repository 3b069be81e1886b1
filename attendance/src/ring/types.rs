//! Ring state and transitions.

use crate::error::NavigationError;
use crate::types::UserProfile;
use serde::{Deserialize, Serialize};

/// Pending navigation direction.
///
/// Selects the visual orientation of the next transition. Display-only: it
/// must not affect which profile is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavDirection {
    /// Moving toward higher indices.
    Forward,
    /// Moving toward lower indices.
    Backward,
    /// No pending movement.
    #[default]
    None,
}

/// 1-based position display, "i+1 / n".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingPosition {
    /// 1-based position of the current profile.
    pub position: usize,
    /// Total number of profiles in the ring.
    pub total: usize,
}

impl std::fmt::Display for RingPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.position, self.total)
    }
}

/// The cyclic profile sequence and cursor.
///
/// Either empty (no attendees to show) or active with an ordered,
/// deduplicated profile sequence, a current index in `0..len`, and a pending
/// direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum RingState {
    /// No profiles.
    #[default]
    Empty,
    /// At least one profile, with a cursor.
    Active {
        /// Ordered, deduplicated profile sequence.
        profiles: Vec<UserProfile>,
        /// Current index, `0 <= index < profiles.len()`.
        index: usize,
        /// Pending navigation direction for the next transition.
        direction: NavDirection,
    },
}

impl RingState {
    /// Build ring state from a profile sequence.
    ///
    /// Non-empty profiles start active at index 0 with no pending direction;
    /// an empty sequence yields [`RingState::Empty`].
    #[must_use]
    pub fn seeded(profiles: Vec<UserProfile>) -> Self {
        if profiles.is_empty() {
            Self::Empty
        } else {
            Self::Active {
                profiles,
                index: 0,
                direction: NavDirection::None,
            }
        }
    }

    /// Replace this ring with a freshly seeded one.
    pub fn seed(&mut self, profiles: Vec<UserProfile>) {
        *self = Self::seeded(profiles);
    }

    /// Number of profiles in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Active { profiles, .. } => profiles.len(),
        }
    }

    /// True when the ring holds no profiles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Current index, when active.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Active { index, .. } => Some(*index),
        }
    }

    /// Pending navigation direction.
    #[must_use]
    pub const fn direction(&self) -> NavDirection {
        match self {
            Self::Empty => NavDirection::None,
            Self::Active { direction, .. } => *direction,
        }
    }

    /// The currently presented profile, when active.
    #[must_use]
    pub fn current(&self) -> Option<&UserProfile> {
        match self {
            Self::Empty => None,
            Self::Active {
                profiles, index, ..
            } => profiles.get(*index),
        }
    }

    /// 1-based position and total for display, when active.
    #[must_use]
    pub fn position(&self) -> Option<RingPosition> {
        match self {
            Self::Empty => None,
            Self::Active {
                profiles, index, ..
            } => Some(RingPosition {
                position: index + 1,
                total: profiles.len(),
            }),
        }
    }

    /// Move forward one profile, wrapping past the last to the first.
    ///
    /// A single-element ring stays put with direction cleared.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::EmptyRing`] on an empty ring; state is
    /// unchanged.
    pub fn advance(&mut self) -> Result<(), NavigationError> {
        match self {
            Self::Empty => Err(NavigationError::EmptyRing),
            Self::Active {
                profiles,
                index,
                direction,
            } => {
                if profiles.len() <= 1 {
                    *direction = NavDirection::None;
                } else {
                    *index = (*index + 1) % profiles.len();
                    *direction = NavDirection::Forward;
                }
                Ok(())
            },
        }
    }

    /// Move backward one profile, wrapping before the first to the last.
    ///
    /// A single-element ring stays put with direction cleared.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::EmptyRing`] on an empty ring; state is
    /// unchanged.
    pub fn retreat(&mut self) -> Result<(), NavigationError> {
        match self {
            Self::Empty => Err(NavigationError::EmptyRing),
            Self::Active {
                profiles,
                index,
                direction,
            } => {
                if profiles.len() <= 1 {
                    *direction = NavDirection::None;
                } else {
                    *index = (*index + profiles.len() - 1) % profiles.len();
                    *direction = NavDirection::Backward;
                }
                Ok(())
            },
        }
    }

    /// Jump directly to index `k`.
    ///
    /// Direction is forward when moving to a higher index, backward when
    /// moving to a lower one, and none when `k` is already current.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::IndexOutOfRange`] when `k` is outside
    /// `0..len` (including any `k` on an empty ring); state is unchanged.
    pub fn jump_to(&mut self, k: usize) -> Result<(), NavigationError> {
        match self {
            Self::Empty => Err(NavigationError::IndexOutOfRange {
                requested: k,
                len: 0,
            }),
            Self::Active {
                profiles,
                index,
                direction,
            } => {
                if k >= profiles.len() {
                    return Err(NavigationError::IndexOutOfRange {
                        requested: k,
                        len: profiles.len(),
                    });
                }
                *direction = match k.cmp(index) {
                    std::cmp::Ordering::Greater => NavDirection::Forward,
                    std::cmp::Ordering::Less => NavDirection::Backward,
                    std::cmp::Ordering::Equal => NavDirection::None,
                };
                *index = k;
                Ok(())
            },
        }
    }
}
