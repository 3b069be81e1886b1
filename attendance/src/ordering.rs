//! Attendee ordering policy.
//!
//! Pure and deterministic: the viewer, when present among the raw attendee
//! identifiers, is pinned to the front; everyone else keeps their backend
//! order. No I/O, no deduplication - duplicates are resolved after
//! hydration, by profile identity.

use crate::types::{Identifier, UserId};

/// Order raw attendee identifiers with the viewer pinned first.
///
/// When `viewer` is present in `raw` (exact identifier equality in the
/// internal-id space - no normalization against handles), the result is the
/// viewer followed by `raw` with all occurrences of the viewer removed,
/// relative order preserved. When the viewer is absent or anonymous, `raw`
/// is returned unchanged.
///
/// Idempotent: `order(order(raw, v), v) == order(raw, v)`.
#[must_use]
pub fn order(raw: &[Identifier], viewer: Option<UserId>) -> Vec<Identifier> {
    let Some(viewer) = viewer else {
        return raw.to_vec();
    };

    let pin = Identifier::internal(viewer);
    if !raw.contains(&pin) {
        return raw.to_vec();
    }

    let mut ordered = Vec::with_capacity(raw.len());
    ordered.push(pin.clone());
    ordered.extend(raw.iter().filter(|id| **id != pin).cloned());
    ordered
}
