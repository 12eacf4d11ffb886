//! Error types for the IIIF library.
//!
//! This module defines all error types that can occur during manifest
//! construction and serialization.

use crate::identifier::Identifier;
use crate::minter::MintKind;

/// Result type alias for IIIF library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a IIIF Presentation document.
///
/// Every variant is a synchronous, non-retryable contract violation. A failed
/// operation leaves the entity it was invoked on unmodified.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identifier is not an absolute URI
    #[error("Invalid identifier: '{0}' is not an absolute URI")]
    InvalidIdentifier(String),

    /// Malformed entity state introduced by a setter or factory
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two sibling resources under the same parent share an identifier
    #[error("Duplicate identifier: {0} is already attached under this parent")]
    DuplicateIdentifier(Identifier),

    /// A minter bound to one manifest was used for an entity attached to another
    #[error("Unbound minter: minter is bound to {minter} but the entity belongs to {manifest}")]
    UnboundMinter {
        /// Manifest identifier the minter is bound to
        minter: Identifier,
        /// Manifest identifier the entity is being attached under
        manifest: Identifier,
    },

    /// An annotation's target does not reference its owning canvas
    #[error("Malformed target: annotation targets {target} but its page is owned by canvas {canvas}")]
    MalformedTarget {
        /// Target identifier carried by the annotation (fragment stripped)
        target: Identifier,
        /// Identifier of the canvas that owns the annotation page
        canvas: Identifier,
    },

    /// A content resource cannot be framed by its canvas's declared extent
    #[error("Content out of bounds: {content} cannot be framed by canvas {canvas}: {reason}")]
    ContentOutOfBounds {
        /// Identifier of the content resource being painted
        content: Identifier,
        /// Identifier of the canvas that cannot frame it
        canvas: Identifier,
        /// Which extent is missing or exceeded
        reason: String,
    },

    /// The minter's counter space for a resource kind is exhausted
    #[error("Minting exhausted: no identifiers left for kind {0}")]
    MintingExhausted(MintKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(uri: &str) -> Identifier {
        Identifier::new(uri).unwrap()
    }

    #[test]
    fn test_invalid_identifier_error() {
        let err = Error::InvalidIdentifier("not a uri".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid identifier"));
        assert!(msg.contains("not a uri"));
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation("width and height must both be > 0".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Validation error"));
        assert!(msg.contains("width and height"));
    }

    #[test]
    fn test_duplicate_identifier_error() {
        let err = Error::DuplicateIdentifier(id("https://example.com/canvas/p1"));
        let msg = format!("{}", err);
        assert!(msg.contains("Duplicate identifier"));
        assert!(msg.contains("canvas/p1"));
    }

    #[test]
    fn test_unbound_minter_error() {
        let err = Error::UnboundMinter {
            minter: id("https://example.com/a/manifest"),
            manifest: id("https://example.com/b/manifest"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("a/manifest"));
        assert!(msg.contains("b/manifest"));
    }

    #[test]
    fn test_malformed_target_error() {
        let err = Error::MalformedTarget {
            target: id("https://example.com/canvas/p2"),
            canvas: id("https://example.com/canvas/p1"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("canvas/p2"));
        assert!(msg.contains("canvas/p1"));
    }

    #[test]
    fn test_content_out_of_bounds_error() {
        let err = Error::ContentOutOfBounds {
            content: id("https://example.com/full.jpg"),
            canvas: id("https://example.com/canvas/p1"),
            reason: "width 6200 exceeds canvas width 100".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("full.jpg"));
        assert!(msg.contains("canvas/p1"));
        assert!(msg.contains("exceeds"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
