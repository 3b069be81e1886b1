//! Session-scoped attendee cache.
//!
//! One cache lives for one viewing session. Entries are created on first
//! resolution per event and the whole map is invalidated at once when the
//! enclosing event list reloads; there is no per-entry expiry and nothing is
//! persisted across restarts.

use crate::error::AttendanceError;
use crate::types::{EventId, Identifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generation marker for the attendee cache.
///
/// Bumped on every invalidation. Fetches record the epoch they were issued
/// under; results carrying a stale epoch are discarded instead of written
/// back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CacheEpoch(u64);

impl CacheEpoch {
    /// The epoch after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CacheEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "epoch#{}", self.0)
    }
}

/// Epoch-tagged map of resolved attendee identifier lists.
///
/// Keyed by event, valued by the raw ordered attendee identifiers as of the
/// most recent successful fetch. Owned by the session; mutated only by the
/// attendee resolver.
#[derive(Debug, Clone, Default)]
pub struct AttendeeCache {
    epoch: CacheEpoch,
    entries: HashMap<EventId, Vec<Identifier>>,
}

impl AttendeeCache {
    /// Create an empty cache at the initial epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current epoch.
    #[must_use]
    pub const fn epoch(&self) -> CacheEpoch {
        self.epoch
    }

    /// Look up the cached attendee list for an event.
    #[must_use]
    pub fn get(&self, event_id: EventId) -> Option<&[Identifier]> {
        self.entries.get(&event_id).map(Vec::as_slice)
    }

    /// Store a resolved attendee list, if the issuing epoch is still current.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::CacheEpochMismatch`] (and stores nothing)
    /// when `issued` predates an invalidation - the in-flight result is
    /// stale and must not repopulate the new epoch.
    pub fn insert(
        &mut self,
        issued: CacheEpoch,
        event_id: EventId,
        ids: Vec<Identifier>,
    ) -> Result<(), AttendanceError> {
        if issued != self.epoch {
            tracing::debug!(%event_id, %issued, current = %self.epoch, "discarding stale cache write");
            return Err(AttendanceError::CacheEpochMismatch);
        }
        self.entries.insert(event_id, ids);
        Ok(())
    }

    /// Invalidate the whole cache atomically.
    ///
    /// Clears every entry and bumps the epoch so in-flight resolutions
    /// started against the old epoch cannot write back.
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.next();
        self.entries.clear();
        tracing::debug!(epoch = %self.epoch, "attendee cache invalidated");
    }

    /// Number of cached events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
