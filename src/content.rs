//! Paintable content resources.
//!
//! The bodies that can be painted onto a canvas form a closed, small family:
//! [`ImageContent`] (spatial), [`SoundContent`] (temporal), and
//! [`VideoContent`] (both). [`ContentResource`] is the sum type the painter
//! and serializer operate on; serialization matches exhaustively rather than
//! dispatching through an open trait.
//!
//! Spatial fields are not representable on a sound resource and temporal
//! fields are not representable on an image resource, so the
//! mutual-exclusion invariant holds by construction. Value-level invariants
//! (both dimensions present and positive, duration positive and finite) are
//! checked at the setter that introduces them.

use crate::error::Result;
use crate::identifier::Identifier;
use crate::label::Label;
use crate::utils::{check_duration, check_width_height};
use serde_json::Value;

/// An image content resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    id: Identifier,
    format: Option<String>,
    label: Option<Label>,
    dimensions: Option<(u32, u32)>,
    services: Vec<Value>,
}

/// A sound content resource.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundContent {
    id: Identifier,
    format: Option<String>,
    label: Option<Label>,
    duration: Option<f64>,
    services: Vec<Value>,
}

/// A video content resource.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoContent {
    id: Identifier,
    format: Option<String>,
    label: Option<Label>,
    dimensions: Option<(u32, u32)>,
    duration: Option<f64>,
    services: Vec<Value>,
}

impl ImageContent {
    /// Create an image content resource.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            format: None,
            label: None,
            dimensions: None,
            services: Vec::new(),
        }
    }

    /// Set the pixel width and height. Both must be greater than zero.
    pub fn width_height(mut self, width: u32, height: u32) -> Result<Self> {
        self.dimensions = Some(check_width_height(width, height)?);
        Ok(self)
    }

    /// Set the media type, e.g. `image/jpeg`.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the resource label.
    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Attach an opaque service descriptor, e.g. a IIIF Image API service.
    pub fn service(mut self, service: Value) -> Self {
        self.services.push(service);
        self
    }
}

impl SoundContent {
    /// Create a sound content resource.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            format: None,
            label: None,
            duration: None,
            services: Vec::new(),
        }
    }

    /// Set the duration in seconds. Must be positive and finite.
    pub fn duration(mut self, duration: f64) -> Result<Self> {
        self.duration = Some(check_duration(duration)?);
        Ok(self)
    }

    /// Set the media type, e.g. `audio/mp4`.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the resource label.
    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Attach an opaque service descriptor.
    pub fn service(mut self, service: Value) -> Self {
        self.services.push(service);
        self
    }
}

impl VideoContent {
    /// Create a video content resource.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            format: None,
            label: None,
            dimensions: None,
            duration: None,
            services: Vec::new(),
        }
    }

    /// Set the pixel width and height. Both must be greater than zero.
    pub fn width_height(mut self, width: u32, height: u32) -> Result<Self> {
        self.dimensions = Some(check_width_height(width, height)?);
        Ok(self)
    }

    /// Set the duration in seconds. Must be positive and finite.
    pub fn duration(mut self, duration: f64) -> Result<Self> {
        self.duration = Some(check_duration(duration)?);
        Ok(self)
    }

    /// Set the media type, e.g. `video/mp4`.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the resource label.
    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Attach an opaque service descriptor.
    pub fn service(mut self, service: Value) -> Self {
        self.services.push(service);
        self
    }
}

/// A paintable content resource body.
///
/// The variant set is closed: the serializer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentResource {
    /// An image body
    Image(ImageContent),
    /// A sound body
    Sound(SoundContent),
    /// A video body
    Video(VideoContent),
}

impl ContentResource {
    /// Get the resource identifier.
    pub fn id(&self) -> &Identifier {
        match self {
            ContentResource::Image(image) => &image.id,
            ContentResource::Sound(sound) => &sound.id,
            ContentResource::Video(video) => &video.id,
        }
    }

    /// Get the IIIF `type` value for this resource.
    pub fn type_name(&self) -> &'static str {
        match self {
            ContentResource::Image(_) => "Image",
            ContentResource::Sound(_) => "Sound",
            ContentResource::Video(_) => "Video",
        }
    }

    /// Get the media type, if set.
    pub fn format(&self) -> Option<&str> {
        match self {
            ContentResource::Image(image) => image.format.as_deref(),
            ContentResource::Sound(sound) => sound.format.as_deref(),
            ContentResource::Video(video) => video.format.as_deref(),
        }
    }

    /// Get the resource label, if set.
    pub fn label(&self) -> Option<&Label> {
        match self {
            ContentResource::Image(image) => image.label.as_ref(),
            ContentResource::Sound(sound) => sound.label.as_ref(),
            ContentResource::Video(video) => video.label.as_ref(),
        }
    }

    /// Get the `(width, height)` pair, if the variant carries one.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            ContentResource::Image(image) => image.dimensions,
            ContentResource::Sound(_) => None,
            ContentResource::Video(video) => video.dimensions,
        }
    }

    /// Get the duration in seconds, if the variant carries one.
    pub fn duration(&self) -> Option<f64> {
        match self {
            ContentResource::Image(_) => None,
            ContentResource::Sound(sound) => sound.duration,
            ContentResource::Video(video) => video.duration,
        }
    }

    /// Get the attached service descriptors.
    pub fn services(&self) -> &[Value] {
        match self {
            ContentResource::Image(image) => &image.services,
            ContentResource::Sound(sound) => &sound.services,
            ContentResource::Video(video) => &video.services,
        }
    }
}

impl From<ImageContent> for ContentResource {
    fn from(image: ImageContent) -> Self {
        ContentResource::Image(image)
    }
}

impl From<SoundContent> for ContentResource {
    fn from(sound: SoundContent) -> Self {
        ContentResource::Sound(sound)
    }
}

impl From<VideoContent> for ContentResource {
    fn from(video: VideoContent) -> Self {
        ContentResource::Video(video)
    }
}
