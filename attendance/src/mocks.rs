//! Mock data-service implementations.
//!
//! In-memory, scriptable implementations of the service ports for unit
//! tests, scenario tests, and the demo binary. Each mock supports failure
//! injection and counts backend calls so tests can assert cache behavior.

use crate::services::{AttendanceService, EventService, ProfileService, ServiceError};
use crate::types::{AttendanceRecord, EventId, Identifier, LiveEvent, UserId, UserProfile};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

/// In-memory attendance records with failure injection.
#[derive(Debug, Clone, Default)]
pub struct MockAttendanceService {
    records: Arc<Mutex<HashMap<EventId, Vec<AttendanceRecord>>>>,
    failing: Arc<AtomicBool>,
    fetches: Arc<AtomicUsize>,
}

impl MockAttendanceService {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `user_id` attends `event_id`, appended in call order.
    pub fn add_attendee(&self, event_id: EventId, user_id: UserId) {
        lock(&self.records)
            .entry(event_id)
            .or_default()
            .push(AttendanceRecord { event_id, user_id });
    }

    /// Remove a user's attendance record for an event.
    pub fn remove_attendee(&self, event_id: EventId, user_id: UserId) {
        if let Some(records) = lock(&self.records).get_mut(&event_id) {
            records.retain(|record| record.user_id != user_id);
        }
    }

    /// Make every fetch fail with [`ServiceError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `attendance_for` calls made so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttendanceService for MockAttendanceService {
    async fn attendance_for(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("attendance backend down".into()));
        }

        Ok(lock(&self.records).get(&event_id).cloned().unwrap_or_default())
    }
}

/// In-memory profile store with per-user failure injection.
#[derive(Debug, Clone, Default)]
pub struct MockProfileService {
    by_id: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    failing: Arc<AtomicBool>,
    failing_ids: Arc<Mutex<HashSet<UserId>>>,
    fetches: Arc<AtomicUsize>,
}

impl MockProfileService {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a profile.
    pub fn insert(&self, profile: UserProfile) {
        lock(&self.by_id).insert(profile.id, profile);
    }

    /// Delete a profile, simulating a removed account.
    pub fn remove(&self, user_id: UserId) {
        lock(&self.by_id).remove(&user_id);
    }

    /// Make every fetch fail with [`ServiceError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make fetches for one specific user fail.
    pub fn fail_for(&self, user_id: UserId) {
        lock(&self.failing_ids).insert(user_id);
    }

    /// Number of `fetch_profile` calls made so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn resolve(&self, id: &Identifier) -> Option<UserProfile> {
        let profiles = lock(&self.by_id);
        match id {
            Identifier::Internal(user_id) => profiles.get(user_id).cloned(),
            Identifier::Handle(handle) => profiles
                .values()
                .find(|profile| profile.handle == *handle)
                .cloned(),
        }
    }
}

#[async_trait]
impl ProfileService for MockProfileService {
    async fn fetch_profile(&self, id: &Identifier) -> Result<Option<UserProfile>, ServiceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("profile backend down".into()));
        }

        let resolved = self.resolve(id);
        if let Some(profile) = &resolved {
            if lock(&self.failing_ids).contains(&profile.id) {
                return Err(ServiceError::Unavailable(format!(
                    "profile fetch failed for {id}"
                )));
            }
        }

        Ok(resolved)
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("profile backend down".into()));
        }

        let mut profiles = lock(&self.by_id);
        let collision = profiles
            .values()
            .any(|existing| existing.handle == profile.handle && existing.id != profile.id);
        if collision {
            return Err(ServiceError::HandleTaken(profile.handle.clone()));
        }

        profiles.insert(profile.id, profile.clone());
        Ok(())
    }
}

/// In-memory attended-events lookup.
#[derive(Debug, Clone, Default)]
pub struct MockEventService {
    events: Arc<Mutex<HashMap<UserId, Vec<LiveEvent>>>>,
    failing: Arc<AtomicBool>,
}

impl MockEventService {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `user_id` attended `event`, appended in call order.
    pub fn add_attended(&self, user_id: UserId, event: LiveEvent) {
        lock(&self.events).entry(user_id).or_default().push(event);
    }

    /// Make every fetch fail with [`ServiceError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventService for MockEventService {
    async fn events_attended_by(&self, user_id: UserId) -> Result<Vec<LiveEvent>, ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("event backend down".into()));
        }

        Ok(lock(&self.events).get(&user_id).cloned().unwrap_or_default())
    }
}
