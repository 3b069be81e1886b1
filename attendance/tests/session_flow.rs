//! End-to-end scenarios for the live attendance session.
//!
//! Drives the full resolve → order → hydrate → seed pipeline through the
//! session facade against in-memory services.

#![allow(clippy::unwrap_used)] // Test code

use encore_attendance::mocks::{MockAttendanceService, MockEventService, MockProfileService};
use encore_attendance::session::{
    LiveAttendanceSession, PresentationStatus, ProductionSessionEnvironment,
};
use encore_attendance::types::{EventId, Handle, LiveEvent, UserId, UserProfile};
use encore_attendance::{AttendanceError, MonthKey, RingState};
use chrono::NaiveDate;
use encore_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

struct Backend {
    attendance: MockAttendanceService,
    profiles: MockProfileService,
    events: MockEventService,
}

impl Backend {
    fn new() -> Self {
        Self {
            attendance: MockAttendanceService::new(),
            profiles: MockProfileService::new(),
            events: MockEventService::new(),
        }
    }

    fn environment(&self) -> ProductionSessionEnvironment {
        ProductionSessionEnvironment::new(
            Arc::new(self.attendance.clone()),
            Arc::new(self.profiles.clone()),
            Arc::new(self.events.clone()),
            Arc::new(test_clock()),
        )
    }

    fn add_user(&self, name: &str) -> UserId {
        let profile = UserProfile::new(UserId::new(), Handle::new(name), name.to_owned());
        let id = profile.id;
        self.profiles.insert(profile);
        id
    }

    fn attend(&self, event_id: EventId, user_id: UserId) {
        self.attendance.add_attendee(event_id, user_id);
    }
}

#[tokio::test]
async fn empty_event_presents_no_attendees() {
    let backend = Backend::new();
    let event_id = EventId::new();

    let session = LiveAttendanceSession::new(None, backend.environment());
    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    assert_eq!(ring, RingState::Empty);
    assert_eq!(session.status().await, Some(PresentationStatus::Ready));
    assert_eq!(session.position().await, None);
}

#[tokio::test]
async fn viewer_among_five_attendees_is_pinned_first() {
    let backend = Backend::new();
    let event_id = EventId::new();

    let a = backend.add_user("ada");
    let b = backend.add_user("brian");
    let viewer = backend.add_user("viewer");
    let c = backend.add_user("chris");
    let d = backend.add_user("dana");
    for user in [a, b, viewer, c, d] {
        backend.attend(event_id, user);
    }

    let session = LiveAttendanceSession::new(Some(viewer), backend.environment());
    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    assert_eq!(ring.len(), 5);
    // The viewer sees their own profile first; everyone else keeps backend order.
    assert_eq!(ring.current().map(|p| p.id), Some(viewer));
    assert_eq!(ring.position().unwrap().to_string(), "1 / 5");

    let order: Vec<UserId> = match &ring {
        RingState::Active { profiles, .. } => profiles.iter().map(|p| p.id).collect(),
        RingState::Empty => Vec::new(),
    };
    assert_eq!(order, vec![viewer, a, b, c, d]);
}

#[tokio::test]
async fn anonymous_viewer_gets_backend_order() {
    let backend = Backend::new();
    let event_id = EventId::new();
    let a = backend.add_user("ada");
    let b = backend.add_user("brian");
    backend.attend(event_id, a);
    backend.attend(event_id, b);

    let session = LiveAttendanceSession::new(None, backend.environment());
    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    assert_eq!(ring.current().map(|p| p.id), Some(a));
}

#[tokio::test]
async fn deleted_profile_is_dropped_from_the_ring() {
    let backend = Backend::new();
    let event_id = EventId::new();

    let a = backend.add_user("ada");
    let b = backend.add_user("brian");
    let c = backend.add_user("chris");
    for user in [a, b, c] {
        backend.attend(event_id, user);
    }
    // Brian deletes their account between attending and the ring opening.
    backend.profiles.remove(b);

    let session = LiveAttendanceSession::new(None, backend.environment());
    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    assert_eq!(ring.len(), 2);
    let order: Vec<UserId> = match &ring {
        RingState::Active { profiles, .. } => profiles.iter().map(|p| p.id).collect(),
        RingState::Empty => Vec::new(),
    };
    assert_eq!(order, vec![a, c]);
}

#[tokio::test]
async fn second_open_reuses_the_cache() {
    let backend = Backend::new();
    let event_id = EventId::new();
    let a = backend.add_user("ada");
    backend.attend(event_id, a);

    let session = LiveAttendanceSession::new(None, backend.environment());

    let first = session.open_ring_and_wait(event_id, WAIT).await.unwrap();
    assert_eq!(first.len(), 1);

    session.close_ring().await.unwrap();

    let second = session.open_ring_and_wait(event_id, WAIT).await.unwrap();
    assert_eq!(second.len(), 1);

    // Exactly one attendance query across both opens.
    assert_eq!(backend.attendance.fetch_count(), 1);
}

#[tokio::test]
async fn reloading_the_event_list_invalidates_the_cache() {
    let backend = Backend::new();
    let event_id = EventId::new();
    let a = backend.add_user("ada");
    backend.attend(event_id, a);

    let session = LiveAttendanceSession::new(None, backend.environment());

    session.open_ring_and_wait(event_id, WAIT).await.unwrap();
    assert_eq!(backend.attendance.fetch_count(), 1);

    let mut handle = session.reload_events().await.unwrap();
    handle.wait().await;

    // The cache was cleared wholesale; the next open re-queries.
    session.open_ring_and_wait(event_id, WAIT).await.unwrap();
    assert_eq!(backend.attendance.fetch_count(), 2);
}

#[tokio::test]
async fn resolution_failure_is_recoverable_and_uncached() {
    let backend = Backend::new();
    let event_id = EventId::new();
    let a = backend.add_user("ada");
    backend.attend(event_id, a);
    backend.attendance.set_failing(true);

    let session = LiveAttendanceSession::new(None, backend.environment());

    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();
    assert_eq!(ring, RingState::Empty);
    assert!(matches!(
        session.status().await,
        Some(PresentationStatus::Failed(
            AttendanceError::TransientFetchFailure(_)
        ))
    ));
    assert!(matches!(
        session.last_error().await,
        Some(AttendanceError::TransientFetchFailure(_))
    ));

    // The failure was not cached: once the backend recovers, a retry works.
    backend.attendance.set_failing(false);
    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();
    assert_eq!(ring.len(), 1);
    assert_eq!(session.status().await, Some(PresentationStatus::Ready));
}

#[tokio::test]
async fn total_profile_failure_surfaces_recoverable_error() {
    let backend = Backend::new();
    let event_id = EventId::new();
    let a = backend.add_user("ada");
    let b = backend.add_user("brian");
    backend.attend(event_id, a);
    backend.attend(event_id, b);
    backend.profiles.set_failing(true);

    let session = LiveAttendanceSession::new(None, backend.environment());
    let ring = session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    assert_eq!(ring, RingState::Empty);
    assert!(matches!(
        session.status().await,
        Some(PresentationStatus::Failed(
            AttendanceError::TransientFetchFailure(_)
        ))
    ));
}

#[tokio::test]
async fn navigation_wraps_in_both_directions() {
    let backend = Backend::new();
    let event_id = EventId::new();
    for name in ["ada", "brian", "chris"] {
        let id = backend.add_user(name);
        backend.attend(event_id, id);
    }

    let session = LiveAttendanceSession::new(None, backend.environment());
    session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    // Retreat from the front wraps to the back.
    let position = session.retreat().await.unwrap().unwrap();
    assert_eq!(position.to_string(), "3 / 3");

    // Advance from the back wraps to the front.
    let position = session.advance().await.unwrap().unwrap();
    assert_eq!(position.to_string(), "1 / 3");

    // Gestures drive the same transitions.
    let position = session.release_gesture(-75.0).await.unwrap().unwrap();
    assert_eq!(position.to_string(), "2 / 3");

    // A sub-threshold release changes nothing.
    let position = session.release_gesture(10.0).await.unwrap().unwrap();
    assert_eq!(position.to_string(), "2 / 3");
}

#[tokio::test]
async fn out_of_range_jump_is_rejected_without_moving() {
    let backend = Backend::new();
    let event_id = EventId::new();
    for name in ["ada", "brian"] {
        let id = backend.add_user(name);
        backend.attend(event_id, id);
    }

    let session = LiveAttendanceSession::new(None, backend.environment());
    session.open_ring_and_wait(event_id, WAIT).await.unwrap();

    let position = session.jump_to(7).await.unwrap().unwrap();
    assert_eq!(position.to_string(), "1 / 2");
    assert!(matches!(
        session.last_error().await,
        Some(AttendanceError::InvalidNavigation(_))
    ));
}

#[tokio::test]
async fn reload_loads_and_groups_the_viewers_events() {
    let backend = Backend::new();
    let viewer = backend.add_user("viewer");

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let gig = |artist: &str, when: NaiveDate| LiveEvent {
        id: EventId::new(),
        artist: artist.to_owned(),
        date: when,
        venue: "Venue".to_owned(),
        created_by: viewer,
    };

    // Pre-sorted by date descending, as callers are expected to provide.
    backend.events.add_attended(viewer, gig("d", date(2026, 1, 10)));
    backend.events.add_attended(viewer, gig("c", date(2025, 1, 5)));
    backend.events.add_attended(viewer, gig("b", date(2024, 7, 2)));
    backend.events.add_attended(viewer, gig("a", date(2024, 3, 1)));

    let session = LiveAttendanceSession::new(Some(viewer), backend.environment());
    let mut handle = session.reload_events().await.unwrap();
    handle.wait().await;

    assert_eq!(session.my_events().await.len(), 4);

    // test_clock pins today at 2025-06-15.
    let (buckets, open) = session.grouped_events().await;
    let keys: Vec<MonthKey> = buckets.iter().map(|b| b.key).collect();
    assert_eq!(
        keys,
        vec![
            MonthKey { year: 2026, month: 1 },
            MonthKey { year: 2025, month: 1 },
            MonthKey { year: 2024, month: 7 },
            MonthKey { year: 2024, month: 3 },
        ]
    );
    assert_eq!(
        open,
        vec![
            MonthKey { year: 2026, month: 1 },
            MonthKey { year: 2025, month: 1 },
            MonthKey { year: 2024, month: 7 },
        ]
    );
}

#[tokio::test]
async fn switching_events_reseeds_the_ring() {
    let backend = Backend::new();
    let first_event = EventId::new();
    let second_event = EventId::new();

    let a = backend.add_user("ada");
    backend.attend(first_event, a);
    for name in ["brian", "chris"] {
        let id = backend.add_user(name);
        backend.attend(second_event, id);
    }

    let session = LiveAttendanceSession::new(None, backend.environment());

    let ring = session.open_ring_and_wait(first_event, WAIT).await.unwrap();
    assert_eq!(ring.len(), 1);

    let ring = session.open_ring_and_wait(second_event, WAIT).await.unwrap();
    assert_eq!(ring.len(), 2);
    assert_eq!(ring.index(), Some(0));
}
