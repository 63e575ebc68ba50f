//! # Interval Overlap Checking
//!
//! Bookings are half-open intervals `[start, end)`. Two bookings at the same
//! location collide iff `s1 < e2 && s2 < e1`, so an event that ends exactly
//! when another begins does not collide with it.
//!
//! Only events that occupy a location (see [`EventStatus::OCCUPYING`]) are
//! considered. Callers validate `end > start` before checking.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::{ConflictingEvent, EventResult},
    models::event::{Event, EventStatus},
    repository::EventRepository,
};

/// Returns true when `[s1, e1)` and `[s2, e2)` share at least one instant.
pub fn intervals_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Picks the first existing event that collides with the candidate interval.
///
/// `existing` may contain events at other locations or in non-occupying
/// statuses; those are skipped, as is `exclude_id`.
pub fn find_overlapping<'a, I>(
    existing: I,
    location: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_id: Option<Uuid>,
) -> Option<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    existing.into_iter().find(|event| {
        event.location == location
            && EventStatus::OCCUPYING.contains(&event.status)
            && Some(event.id) != exclude_id
            && intervals_overlap(start, end, event.start, event.end)
    })
}

/// Queries the repository for events occupying `location` and reports the
/// first one that collides with `[start, end)`.
pub async fn find_conflict(
    repo: &dyn EventRepository,
    location: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_id: Option<Uuid>,
) -> EventResult<Option<ConflictingEvent>> {
    let occupying = repo
        .find_events_by_location_and_status(location, &EventStatus::OCCUPYING)
        .await?;

    Ok(
        find_overlapping(&occupying, location, start, end, exclude_id).map(|event| {
            ConflictingEvent {
                id: event.id,
                name: event.name.clone(),
                location: event.location.clone(),
                start: event.start,
                end: event.end,
            }
        }),
    )
}

pub async fn has_conflict(
    repo: &dyn EventRepository,
    location: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_id: Option<Uuid>,
) -> EventResult<bool> {
    Ok(find_conflict(repo, location, start, end, exclude_id)
        .await?
        .is_some())
}
