//! # IIIF Oxide
//!
//! Construction of IIIF Presentation API 3.0 manifests: an object model for
//! digitized objects (images, audio, video), an identifier minter for stable
//! intra-manifest URIs, an annotation painting engine, and canonical JSON-LD
//! serialization.
//!
//! ## Core pieces
//!
//! - **Object model**: [`Manifest`] → [`Canvas`] → [`AnnotationPage`] →
//!   [`PaintingAnnotation`] → [`ContentResource`], each level exclusively
//!   owning the next (annotations reference their bodies).
//! - **Minter**: [`Minter`] derives unique, deterministic identifiers for
//!   canvases, pages, and annotations the caller did not address explicitly.
//! - **Painter**: `Canvas::paint_with` (and the explicit [`Painter`]) keep
//!   the page → annotation → body chain well-formed, with correct target
//!   fragments and dimension/duration invariants.
//! - **Serializer**: [`ManifestSerializer`] emits the Presentation 3.0
//!   JSON-LD shape with deterministic property order and omitted empties.
//!
//! ## Quick start
//!
//! ```
//! use iiif_oxide::{Canvas, Identifier, ImageContent, Label, Manifest};
//!
//! # fn main() -> iiif_oxide::Result<()> {
//! let mut manifest = Manifest::new(
//!     Identifier::new("https://example.com/iiif/book1/manifest")?,
//!     Label::new("en", "Book 1"),
//! );
//! let mut minter = manifest.minter();
//!
//! let mut canvas = Canvas::with_minter(&mut minter)?.with_width_height(1200, 1800)?;
//! let page_image = ImageContent::new(Identifier::new("https://example.com/full.jpg")?)
//!     .width_height(1200, 1800)?
//!     .format("image/jpeg");
//! canvas.paint_with(&mut minter, vec![page_image.into()])?;
//!
//! manifest.add_canvases(vec![canvas])?;
//! let json_ld = manifest.serialize();
//! # assert!(json_ld.contains("\"motivation\":\"painting\""));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Identifiers and minting
pub mod identifier;
pub mod minter;

// Object model
pub mod annotations;
pub mod canvas;
pub mod content;
pub mod label;
pub mod manifest;

// Annotation painting
pub mod painter;

// Canonical JSON-LD output
pub mod serializer;

// Re-exports
pub use annotations::{AnnotationPage, PaintingAnnotation, Target};
pub use canvas::Canvas;
pub use content::{ContentResource, ImageContent, SoundContent, VideoContent};
pub use error::{Error, Result};
pub use identifier::Identifier;
pub use label::Label;
pub use manifest::Manifest;
pub use minter::{MintKind, Minter};
pub use painter::Painter;
pub use serializer::{ManifestSerializer, PRESENTATION_CONTEXT};

// Internal utilities
pub(crate) mod utils {
    //! Shared value-level invariant checks.

    use crate::error::{Error, Result};

    /// Validate a width/height pair: both must be greater than zero.
    ///
    /// Callers store the pair as a unit, so a partial pair is never
    /// representable; this check covers the value invariant only.
    pub fn check_width_height(width: u32, height: u32) -> Result<(u32, u32)> {
        if width > 0 && height > 0 {
            Ok((width, height))
        } else {
            Err(Error::Validation(format!(
                "width and height must both be > 0, got {}x{}",
                width, height
            )))
        }
    }

    /// Validate a duration in seconds: must be positive and finite.
    pub fn check_duration(duration: f64) -> Result<f64> {
        if duration > 0.0 && duration.is_finite() {
            Ok(duration)
        } else {
            Err(Error::Validation(format!(
                "duration must be a positive finite number of seconds, got {}",
                duration
            )))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_check_width_height() {
            assert_eq!(check_width_height(1200, 1800).unwrap(), (1200, 1800));
            assert!(check_width_height(0, 1800).is_err());
            assert!(check_width_height(1200, 0).is_err());
        }

        #[test]
        fn test_check_duration() {
            assert_eq!(check_duration(1985.024).unwrap(), 1985.024);
            assert!(check_duration(0.0).is_err());
            assert!(check_duration(-3.5).is_err());
            assert!(check_duration(f64::NAN).is_err());
            assert!(check_duration(f64::INFINITY).is_err());
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
