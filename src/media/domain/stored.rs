//! Hosted media descriptors as returned by the upload collaborator.

use super::{MediaDomainError, ParseMediaKindError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a hosted media object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

impl MediaKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MediaKind {
    type Error = ParseMediaKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(ParseMediaKindError(value.to_owned())),
        }
    }
}

/// Opaque handle the hosting provider uses for a stored object.
///
/// Deletion against the provider addresses objects by this handle, never by
/// URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageId(String);

impl StorageId {
    /// Creates a validated storage identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MediaDomainError::EmptyStorageId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, MediaDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MediaDomainError::EmptyStorageId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptor for one hosted media object.
///
/// This is exactly what the external upload collaborator returns: delivery
/// URL, storage handle, detected kind, and optional format metadata. The
/// bytes themselves never pass through the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMedia {
    url: String,
    storage_id: StorageId,
    kind: MediaKind,
    format: Option<String>,
    duration_secs: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
}

impl StoredMedia {
    /// Creates a descriptor from the required upload result fields.
    ///
    /// # Errors
    ///
    /// Returns [`MediaDomainError::EmptyUrl`] when the URL is empty after
    /// trimming.
    pub fn new(
        url: impl Into<String>,
        storage_id: StorageId,
        kind: MediaKind,
    ) -> Result<Self, MediaDomainError> {
        let raw = url.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MediaDomainError::EmptyUrl);
        }

        Ok(Self {
            url: trimmed.to_owned(),
            storage_id,
            kind,
            format: None,
            duration_secs: None,
            width: None,
            height: None,
        })
    }

    /// Sets the container/encoding format reported by the provider.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the duration reported for video objects.
    #[must_use]
    pub const fn with_duration_secs(mut self, duration_secs: f64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    /// Sets the pixel dimensions reported by the provider.
    #[must_use]
    pub const fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Returns the delivery URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the provider storage handle.
    #[must_use]
    pub const fn storage_id(&self) -> &StorageId {
        &self.storage_id
    }

    /// Returns the media kind.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns the reported format, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Returns the reported duration in seconds, if any.
    #[must_use]
    pub const fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    /// Returns the reported width in pixels, if any.
    #[must_use]
    pub const fn width(&self) -> Option<u32> {
        self.width
    }

    /// Returns the reported height in pixels, if any.
    #[must_use]
    pub const fn height(&self) -> Option<u32> {
        self.height
    }
}
