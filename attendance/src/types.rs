//! Core domain types for the attendance crate.

use crate::error::ProfileValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a profile bio, in characters.
pub const MAX_BIO_CHARS: usize = 200;

/// Maximum number of images in a profile gallery.
pub const MAX_GALLERY_IMAGES: usize = 6;

/// Stable, opaque identifier for a live event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Generate a new random event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable, opaque identifier for a user.
///
/// This is the immutable internal identifier. Users also carry a mutable
/// public [`Handle`]; the two identifier spaces are bridged by
/// [`Identifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random user ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-chosen public handle.
///
/// Unique across users (enforced by the backing store) and mutable. Matched
/// exactly, with no case folding or normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(String);

impl Handle {
    /// Create a handle from a string.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A user reference in either identifier space.
///
/// Lookups accept both the stable internal id and the public handle; the
/// backing store disambiguates. Equality is exact per variant - an internal
/// id never compares equal to a handle, even when both resolve to the same
/// profile. Deduplication across representations happens after hydration,
/// by resolved profile identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    /// Stable internal identifier.
    Internal(UserId),
    /// Public handle.
    Handle(Handle),
}

impl Identifier {
    /// Wrap an internal user id.
    #[must_use]
    pub const fn internal(id: UserId) -> Self {
        Self::Internal(id)
    }

    /// Wrap a public handle.
    #[must_use]
    pub fn handle(handle: impl Into<String>) -> Self {
        Self::Handle(Handle::new(handle))
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal(id) => write!(f, "{id}"),
            Self::Handle(handle) => write!(f, "{handle}"),
        }
    }
}

impl From<UserId> for Identifier {
    fn from(id: UserId) -> Self {
        Self::Internal(id)
    }
}

impl From<Handle> for Identifier {
    fn from(handle: Handle) -> Self {
        Self::Handle(handle)
    }
}

/// A single live performance: artist, venue, calendar date.
///
/// Immutable once matched against attendance records for the purposes of
/// this core; creation and editing belong to external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveEvent {
    /// Stable event identifier.
    pub id: EventId,
    /// Performing artist name.
    pub artist: String,
    /// Calendar date of the performance (no time component).
    pub date: NaiveDate,
    /// Venue name.
    pub venue: String,
    /// User who created the event entry.
    pub created_by: UserId,
}

/// Association of one user to one event.
///
/// Many-to-many join with no ordering guarantee from the backing store;
/// ordering is imposed downstream by the ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The attended event.
    pub event_id: EventId,
    /// The attending user.
    pub user_id: UserId,
}

/// Optional social handles attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// Instagram handle.
    pub instagram: Option<String>,
    /// Twitter handle.
    pub twitter: Option<String>,
    /// TikTok handle.
    pub tiktok: Option<String>,
}

impl SocialLinks {
    /// True when no social handle is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instagram.is_none() && self.twitter.is_none() && self.tiktok.is_none()
    }
}

/// A user's full public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable internal identifier. Deduplication key for hydrated rings.
    pub id: UserId,
    /// Public handle.
    pub handle: Handle,
    /// Display name.
    pub display_name: String,
    /// Short bio, at most [`MAX_BIO_CHARS`] characters.
    bio: Option<String>,
    /// Avatar image reference.
    pub avatar: Option<String>,
    /// External link (website, linktree, ...).
    pub link: Option<String>,
    /// Social handles.
    pub socials: SocialLinks,
    /// Ordered gallery, at most [`MAX_GALLERY_IMAGES`] image references.
    gallery: Vec<String>,
}

impl UserProfile {
    /// Create a minimal profile with the given identity.
    #[must_use]
    pub fn new(id: UserId, handle: Handle, display_name: impl Into<String>) -> Self {
        Self {
            id,
            handle,
            display_name: display_name.into(),
            bio: None,
            avatar: None,
            link: None,
            socials: SocialLinks::default(),
            gallery: Vec::new(),
        }
    }

    /// Set or clear the bio.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileValidationError::BioTooLong`] when the bio exceeds
    /// [`MAX_BIO_CHARS`] characters. The profile is left unchanged.
    pub fn set_bio(&mut self, bio: Option<String>) -> Result<(), ProfileValidationError> {
        if let Some(text) = &bio {
            let chars = text.chars().count();
            if chars > MAX_BIO_CHARS {
                return Err(ProfileValidationError::BioTooLong { chars });
            }
        }
        self.bio = bio;
        Ok(())
    }

    /// The bio, if set.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Append an image reference to the gallery.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileValidationError::GalleryFull`] when the gallery
    /// already holds [`MAX_GALLERY_IMAGES`] images.
    pub fn push_gallery_image(
        &mut self,
        image: impl Into<String>,
    ) -> Result<(), ProfileValidationError> {
        if self.gallery.len() >= MAX_GALLERY_IMAGES {
            return Err(ProfileValidationError::GalleryFull);
        }
        self.gallery.push(image.into());
        Ok(())
    }

    /// The ordered gallery.
    #[must_use]
    pub fn gallery(&self) -> &[String] {
        &self.gallery
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(UserId::new(), Handle::new("ada"), "Ada")
    }

    #[test]
    fn bio_within_limit_is_accepted() {
        let mut p = profile();
        p.set_bio(Some("a".repeat(MAX_BIO_CHARS))).unwrap();
        assert_eq!(p.bio().map(str::len), Some(MAX_BIO_CHARS));
    }

    #[test]
    fn bio_over_limit_is_rejected_unchanged() {
        let mut p = profile();
        let err = p.set_bio(Some("a".repeat(MAX_BIO_CHARS + 1))).unwrap_err();
        assert_eq!(
            err,
            ProfileValidationError::BioTooLong {
                chars: MAX_BIO_CHARS + 1
            }
        );
        assert!(p.bio().is_none());
    }

    #[test]
    fn bio_limit_counts_characters_not_bytes() {
        let mut p = profile();
        // 200 two-byte characters: fine by character count.
        p.set_bio(Some("é".repeat(MAX_BIO_CHARS))).unwrap();
        assert!(p.bio().is_some());
    }

    #[test]
    fn gallery_caps_at_six_images() {
        let mut p = profile();
        for i in 0..MAX_GALLERY_IMAGES {
            p.push_gallery_image(format!("img-{i}")).unwrap();
        }
        assert_eq!(
            p.push_gallery_image("img-6").unwrap_err(),
            ProfileValidationError::GalleryFull
        );
        assert_eq!(p.gallery().len(), MAX_GALLERY_IMAGES);
        // Order preserved.
        assert_eq!(p.gallery()[0], "img-0");
    }

    #[test]
    fn identifier_spaces_do_not_compare_equal() {
        let id = UserId::new();
        let by_id = Identifier::internal(id);
        let by_handle = Identifier::handle("ada");
        assert_ne!(by_id, by_handle);
    }

    #[test]
    fn handle_display_is_prefixed() {
        assert_eq!(Handle::new("ada").to_string(), "@ada");
    }
}
