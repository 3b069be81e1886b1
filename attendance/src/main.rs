//! Demo binary for the attendance core.
//!
//! Walks the full data flow against in-memory services: seed events and
//! profiles, open the attendee ring for an event, navigate it, and show the
//! viewer's month-grouped event list.

use chrono::NaiveDate;
use encore_attendance::mocks::{MockAttendanceService, MockEventService, MockProfileService};
use encore_attendance::session::{LiveAttendanceSession, ProductionSessionEnvironment};
use encore_attendance::types::{EventId, Handle, LiveEvent, UserId, UserProfile};
use encore_core::environment::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_attendance=debug,encore_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Encore: attendee ring walkthrough ===\n");

    // Seed the in-memory backend.
    let attendance = MockAttendanceService::new();
    let profiles = MockProfileService::new();
    let events = MockEventService::new();

    let viewer = UserId::new();
    let mut viewer_profile = UserProfile::new(viewer, Handle::new("you"), "You");
    let _ = viewer_profile.set_bio(Some("Front row or nothing.".to_owned()));
    profiles.insert(viewer_profile);

    let names = ["ada", "brian", "chris", "dana"];
    let mut others = Vec::new();
    for name in names {
        let profile = UserProfile::new(UserId::new(), Handle::new(name), name.to_uppercase());
        others.push(profile.id);
        profiles.insert(profile);
    }

    let gig = LiveEvent {
        id: EventId::new(),
        artist: "The National".to_owned(),
        date: date(2025, 5, 3),
        venue: "Paradiso".to_owned(),
        created_by: viewer,
    };
    events.add_attended(viewer, gig.clone());
    events.add_attended(
        viewer,
        LiveEvent {
            id: EventId::new(),
            artist: "Big Thief".to_owned(),
            date: date(2024, 11, 20),
            venue: "Roundhouse".to_owned(),
            created_by: viewer,
        },
    );

    // The viewer is third in backend order; the ring will pin them first.
    attendance.add_attendee(gig.id, others[0]);
    attendance.add_attendee(gig.id, others[1]);
    attendance.add_attendee(gig.id, viewer);
    attendance.add_attendee(gig.id, others[2]);
    attendance.add_attendee(gig.id, others[3]);

    let environment = ProductionSessionEnvironment::new(
        Arc::new(attendance.clone()),
        Arc::new(profiles),
        Arc::new(events),
        Arc::new(SystemClock),
    );
    let session = LiveAttendanceSession::new(Some(viewer), environment);

    // Open the ring and wait for the pipeline.
    println!(">>> Opening ring for {} at {}", gig.artist, gig.venue);
    let ring = session
        .open_ring_and_wait(gig.id, Duration::from_secs(5))
        .await
        .unwrap_or_default();
    if let Some(profile) = ring.current() {
        println!(
            "Seeded with {} attendees, showing {} first",
            ring.len(),
            profile.handle
        );
    }

    // Navigate: taps and gestures.
    for _ in 0..2 {
        if let Ok(Some(position)) = session.advance().await {
            let ring = session.ring().await;
            let handle = ring.current().map(|p| p.handle.to_string());
            println!("advance  -> {position} ({})", handle.unwrap_or_default());
        }
    }
    if let Ok(Some(position)) = session.release_gesture(-80.0).await {
        println!("swipe    -> {position}");
    }
    if let Ok(Some(position)) = session.retreat().await {
        println!("retreat  -> {position}");
    }
    if let Ok(Some(position)) = session.jump_to(0).await {
        println!("jump(0)  -> {position}");
    }

    // Cache reuse: the second open resolves without a backend query.
    let _ = session.close_ring().await;
    let _ = session
        .open_ring_and_wait(gig.id, Duration::from_secs(5))
        .await;
    println!(
        "\nAttendance backend queried {} time(s) across two opens",
        attendance.fetch_count()
    );

    // Month grouping of the viewer's own events.
    if let Ok(mut handle) = session.reload_events().await {
        handle.wait().await;
    }
    let (buckets, open) = session.grouped_events().await;
    println!("\nYour events by month:");
    for bucket in &buckets {
        let marker = if open.contains(&bucket.key) { "open" } else { "closed" };
        println!("  {} [{marker}] - {} event(s)", bucket.label, bucket.events.len());
    }

    let _ = session.shutdown(Duration::from_secs(5)).await;
    println!("\n=== Walkthrough complete ===");
}
