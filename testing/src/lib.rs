//! # Encore Testing
//!
//! Testing utilities and helpers for the Encore architecture.
//!
//! This crate provides:
//! - Mock implementations of shared Environment traits (`FixedClock`)
//! - A fluent Given-When-Then harness for reducer tests ([`ReducerTest`])
//! - Assertion helpers for effect vectors
//!
//! Feature-specific service mocks live in their feature crate's `mocks`
//! module; only universally shared test tooling lives here.
//!
//! ## Example
//!
//! ```ignore
//! use encore_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(RingReducer::new())
//!     .with_env(RingEnvironment::new(test_clock()))
//!     .given_state(RingState::default())
//!     .when_action(RingAction::Advance)
//!     .then_state(|state| assert_eq!(state.index(), Some(1)))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use encore_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of shared Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use encore_testing::mocks::FixedClock;
    /// use encore_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-06-15 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-06-15T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
