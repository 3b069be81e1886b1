//! Reducer for the profile ring.

use crate::error::NavigationError;
use crate::ring::actions::RingAction;
use crate::ring::gesture::{GestureOutcome, classify_gesture};
use crate::ring::types::RingState;
use encore_core::{SmallVec, effect::Effect, reducer::Reducer};
use serde::{Deserialize, Serialize};

/// Ring state plus the last rejected navigation.
///
/// Rejections are recorded rather than raised: the ring itself never
/// changes on an invalid transition, and the presentation layer may show or
/// ignore the error as it sees fit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RingControllerState {
    /// The cyclic profile sequence and cursor.
    pub ring: RingState,
    /// The most recent rejected navigation, cleared by the next valid one.
    pub last_error: Option<NavigationError>,
}

/// Environment for the ring reducer.
///
/// The ring is a pure state machine with no dependencies; this exists so the
/// reducer fits the common shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingEnvironment;

/// Reducer implementing the ring transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingReducer;

impl RingReducer {
    /// Create a new ring reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn apply(
        state: &mut RingControllerState,
        result: Result<(), NavigationError>,
    ) {
        match result {
            Ok(()) => state.last_error = None,
            Err(err) => {
                tracing::debug!(error = %err, "navigation rejected");
                state.last_error = Some(err);
            },
        }
    }
}

impl Reducer for RingReducer {
    type State = RingControllerState;
    type Action = RingAction;
    type Environment = RingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RingAction::Seed { profiles } => {
                state.ring.seed(profiles);
                state.last_error = None;
            },
            RingAction::Advance => {
                let result = state.ring.advance();
                Self::apply(state, result);
            },
            RingAction::Retreat => {
                let result = state.ring.retreat();
                Self::apply(state, result);
            },
            RingAction::JumpTo { index } => {
                let result = state.ring.jump_to(index);
                Self::apply(state, result);
            },
            RingAction::GestureReleased { displacement } => {
                match classify_gesture(displacement) {
                    GestureOutcome::Advance => {
                        let result = state.ring.advance();
                        Self::apply(state, result);
                    },
                    GestureOutcome::Retreat => {
                        let result = state.ring.retreat();
                        Self::apply(state, result);
                    },
                    // Released within the threshold: not an error, nothing moves.
                    GestureOutcome::None => {},
                }
            },
        }

        // Pure state machine - no side effects.
        SmallVec::new()
    }
}
