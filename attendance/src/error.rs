//! Error taxonomy for the attendance core.
//!
//! All I/O errors are caught at component boundaries (resolver, loader) and
//! converted into this taxonomy; nothing propagates as an unhandled fault to
//! the presentation layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected ring navigation.
///
/// Navigation errors leave ring state unchanged; they are recorded for the
/// caller rather than raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NavigationError {
    /// Advance, retreat, or jump was requested on an empty ring.
    #[error("ring is empty")]
    EmptyRing,

    /// `jump_to` index outside `0..len`.
    #[error("index {requested} out of range for ring of {len}")]
    IndexOutOfRange {
        /// The requested index.
        requested: usize,
        /// Current ring length.
        len: usize,
    },
}

/// Profile field validation failures.
///
/// These come from constructor-enforced invariants on [`crate::UserProfile`]
/// and are terminal for the offending edit, never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ProfileValidationError {
    /// Bio exceeds the character limit.
    #[error("bio is {chars} characters, over the {max} limit", max = crate::types::MAX_BIO_CHARS)]
    BioTooLong {
        /// Character count of the rejected bio.
        chars: usize,
    },

    /// Gallery already holds the maximum number of images.
    #[error("gallery is full ({max} images)", max = crate::types::MAX_GALLERY_IMAGES)]
    GalleryFull,
}

/// Recoverable failures surfaced by the attendance core.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AttendanceError {
    /// A profile or event did not resolve.
    ///
    /// Recovered locally: dropped from result sets, surfaced only when it
    /// empties an otherwise-expected non-empty result entirely.
    #[error("not found")]
    NotFound,

    /// Network or backend failure fetching attendance or profiles.
    ///
    /// The session layer may use this to show a retry affordance.
    #[error("transient fetch failure: {0}")]
    TransientFetchFailure(String),

    /// Navigation rejected; state unchanged.
    #[error("invalid navigation: {0}")]
    InvalidNavigation(#[from] NavigationError),

    /// A resolution result arrived after the cache was invalidated.
    ///
    /// Silently discarded, never written back.
    #[error("cache epoch mismatch")]
    CacheEpochMismatch,
}
