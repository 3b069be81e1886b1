//! Profile hydration.
//!
//! Resolves ordered attendee identifiers into full profile records. Fetches
//! run concurrently but output order is the input order, never completion
//! order; missing users are dropped silently and duplicates collapse to
//! their first occurrence.

use crate::error::AttendanceError;
use crate::services::ProfileService;
use crate::types::{Identifier, UserId, UserProfile};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;

/// Hydrates attendee identifiers into profile records.
#[derive(Clone)]
pub struct ProfileLoader {
    profiles: Arc<dyn ProfileService>,
}

impl ProfileLoader {
    /// Create a loader over the profile service.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileService>) -> Self {
        Self { profiles }
    }

    /// Hydrate `ordered` identifiers into profiles.
    ///
    /// All fetches are issued concurrently and the whole batch settles
    /// before output is produced - one slow or failing fetch cannot corrupt
    /// or reorder the others. The output:
    ///
    /// - follows the input order (post-drop, post-dedup);
    /// - drops identifiers that resolve to nothing, and identifiers whose
    ///   individual fetch errored;
    /// - deduplicates by the profile's stable internal id, keeping the first
    ///   occurrence - two representations of the same user (internal id and
    ///   handle) collapse here, not earlier.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::TransientFetchFailure`] only when the
    /// input was non-empty and every single fetch errored. All-NotFound is
    /// an empty success: indistinguishable from everyone having deleted
    /// their account, and treated as "no attendees to show".
    pub async fn hydrate(
        &self,
        ordered: &[Identifier],
    ) -> Result<Vec<UserProfile>, AttendanceError> {
        if ordered.is_empty() {
            return Ok(Vec::new());
        }

        let fetches = ordered.iter().map(|id| self.profiles.fetch_profile(id));
        let results = join_all(fetches).await;

        let mut errored = 0usize;
        let mut missing = 0usize;
        let mut seen: HashSet<UserId> = HashSet::new();
        let mut profiles = Vec::with_capacity(ordered.len());

        for (id, result) in ordered.iter().zip(results) {
            match result {
                Ok(Some(profile)) => {
                    if seen.insert(profile.id) {
                        profiles.push(profile);
                    }
                },
                Ok(None) => {
                    missing += 1;
                    tracing::debug!(identifier = %id, "profile not found, dropped");
                },
                Err(err) => {
                    errored += 1;
                    tracing::warn!(identifier = %id, error = %err, "profile fetch failed, dropped");
                },
            }
        }

        if errored == ordered.len() {
            return Err(AttendanceError::TransientFetchFailure(format!(
                "all {errored} profile fetches failed"
            )));
        }

        tracing::debug!(
            requested = ordered.len(),
            hydrated = profiles.len(),
            missing,
            errored,
            "profiles hydrated"
        );

        Ok(profiles)
    }
}
