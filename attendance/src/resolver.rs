//! Attendee resolution with session-scoped caching.

use crate::cache::{AttendeeCache, CacheEpoch};
use crate::error::AttendanceError;
use crate::services::AttendanceService;
use crate::types::{EventId, Identifier};
use std::sync::{Arc, Mutex, MutexGuard};

/// The outcome of resolving an event's attendees.
///
/// Never an `Err`: backend failure degrades to an empty identifier list
/// with a recoverable error signal the session layer can turn into a retry
/// affordance.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The event that was resolved.
    pub event_id: EventId,
    /// Cache epoch observed when the lookup was issued.
    ///
    /// Consumers compare this against the current epoch before applying the
    /// result; a mismatch means the cache was invalidated mid-flight.
    pub epoch: CacheEpoch,
    /// Raw attendee identifiers in backend-returned order.
    pub ids: Vec<Identifier>,
    /// True when the list came from the cache without a backend call.
    pub from_cache: bool,
    /// Recoverable failure signal; `ids` is empty when set.
    pub error: Option<AttendanceError>,
}

/// Resolves the distinct set of attendee identifiers for a live event.
///
/// Memoizes per event in the session's [`AttendeeCache`]: a cache hit
/// returns the stored list without touching the backend. The cache is
/// populated only on successful fetches, so a failed resolution retries
/// cleanly once the underlying error clears.
///
/// Concurrent first-time resolutions of the same event are not deduplicated;
/// both issue a backend query and the last successful write wins under an
/// unchanged epoch.
#[derive(Clone)]
pub struct AttendeeResolver {
    cache: Arc<Mutex<AttendeeCache>>,
    service: Arc<dyn AttendanceService>,
}

impl AttendeeResolver {
    /// Create a resolver over the session's cache and attendance service.
    #[must_use]
    pub fn new(cache: Arc<Mutex<AttendeeCache>>, service: Arc<dyn AttendanceService>) -> Self {
        Self { cache, service }
    }

    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    fn lock(&self) -> MutexGuard<'_, AttendeeCache> {
        self.cache.lock().unwrap()
    }

    /// Resolve the attendee identifiers for `event_id`.
    ///
    /// Cache hit: returns the entry unchanged, no backend call. Cache miss:
    /// queries the attendance service, extracts user identifiers preserving
    /// backend order, stores them under the epoch observed at issue time,
    /// and returns them. A write whose epoch went stale mid-flight is
    /// dropped; the returned [`Resolution`] still carries the issuing epoch
    /// so the caller's own stale guard fires.
    pub async fn resolve(&self, event_id: EventId) -> Resolution {
        let issued = {
            let cache = self.lock();
            if let Some(ids) = cache.get(event_id) {
                tracing::debug!(%event_id, count = ids.len(), "attendee cache hit");
                return Resolution {
                    event_id,
                    epoch: cache.epoch(),
                    ids: ids.to_vec(),
                    from_cache: true,
                    error: None,
                };
            }
            cache.epoch()
        };

        match self.service.attendance_for(event_id).await {
            Ok(records) => {
                let ids: Vec<Identifier> = records
                    .iter()
                    .map(|record| Identifier::internal(record.user_id))
                    .collect();

                let stored = self.lock().insert(issued, event_id, ids.clone()).is_ok();
                tracing::debug!(%event_id, count = ids.len(), stored, "attendees resolved");

                Resolution {
                    event_id,
                    epoch: issued,
                    ids,
                    from_cache: false,
                    error: None,
                }
            },
            Err(err) => {
                tracing::warn!(%event_id, error = %err, "attendance fetch failed");
                Resolution {
                    event_id,
                    epoch: issued,
                    ids: Vec::new(),
                    from_cache: false,
                    error: Some(AttendanceError::TransientFetchFailure(err.to_string())),
                }
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::mocks::MockAttendanceService;
    use crate::types::UserId;

    fn resolver_with(service: MockAttendanceService) -> (AttendeeResolver, Arc<Mutex<AttendeeCache>>) {
        let cache = Arc::new(Mutex::new(AttendeeCache::new()));
        let resolver = AttendeeResolver::new(Arc::clone(&cache), Arc::new(service));
        (resolver, cache)
    }

    #[tokio::test]
    async fn second_resolution_uses_cache() {
        let service = MockAttendanceService::new();
        let event = EventId::new();
        service.add_attendee(event, UserId::new());
        service.add_attendee(event, UserId::new());

        let (resolver, _cache) = resolver_with(service.clone());

        let first = resolver.resolve(event).await;
        assert!(!first.from_cache);
        assert_eq!(first.ids.len(), 2);

        let second = resolver.resolve(event).await;
        assert!(second.from_cache);
        assert_eq!(second.ids, first.ids);

        // Exactly one backend query across both resolutions.
        assert_eq!(service.fetch_count(), 1);
    }

    #[tokio::test]
    async fn backend_order_is_preserved() {
        let service = MockAttendanceService::new();
        let event = EventId::new();
        let users: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();
        for user in &users {
            service.add_attendee(event, *user);
        }

        let (resolver, _cache) = resolver_with(service);

        let resolution = resolver.resolve(event).await;
        let expected: Vec<Identifier> =
            users.into_iter().map(Identifier::internal).collect();
        assert_eq!(resolution.ids, expected);
    }

    #[tokio::test]
    async fn failure_returns_empty_and_does_not_populate_cache() {
        let service = MockAttendanceService::new();
        let event = EventId::new();
        service.add_attendee(event, UserId::new());
        service.set_failing(true);

        let (resolver, cache) = resolver_with(service.clone());

        let failed = resolver.resolve(event).await;
        assert!(failed.ids.is_empty());
        assert!(matches!(
            failed.error,
            Some(AttendanceError::TransientFetchFailure(_))
        ));
        assert!(cache.lock().unwrap().is_empty());

        // Once the backend recovers, a retry re-queries and populates.
        service.set_failing(false);
        let retried = resolver.resolve(event).await;
        assert!(retried.error.is_none());
        assert_eq!(retried.ids.len(), 1);
        assert_eq!(service.fetch_count(), 2);
    }

    #[tokio::test]
    async fn stale_epoch_result_does_not_repopulate_cache() {
        let service = MockAttendanceService::new();
        let event = EventId::new();
        service.add_attendee(event, UserId::new());

        let cache = Arc::new(Mutex::new(AttendeeCache::new()));
        let resolver = AttendeeResolver::new(Arc::clone(&cache), Arc::new(service));

        // Simulate an invalidation racing the fetch: the insert below uses
        // the pre-invalidation epoch and must be rejected.
        let issued = cache.lock().unwrap().epoch();
        cache.lock().unwrap().invalidate();

        let stored = cache.lock().unwrap().insert(
            issued,
            event,
            vec![Identifier::internal(UserId::new())],
        );
        assert_eq!(stored.unwrap_err(), AttendanceError::CacheEpochMismatch);

        // A fresh resolution against the new epoch works normally.
        let resolution = resolver.resolve(event).await;
        assert!(!resolution.from_cache);
        assert_eq!(resolution.ids.len(), 1);
        assert!(cache.lock().unwrap().get(event).is_some());
    }
}
