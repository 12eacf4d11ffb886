//! Resource identifiers.
//!
//! Every addressable resource in a IIIF Presentation 3.0 document carries an
//! `id` property that must be an absolute URI (IIIF Presentation API 3.0,
//! Section 3.2). [`Identifier`] wraps a validated URI string: equality,
//! ordering, and hashing are string-based, and the value is immutable once
//! constructed.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    /// Absolute URI shape: a scheme followed by at least one
    /// non-whitespace character. Fragment and query grammar is the
    /// caller's responsibility.
    static ref ABSOLUTE_URI: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").unwrap();
}

/// A validated absolute URI used to address a manifest resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier from an absolute URI string.
    ///
    /// Returns [`Error::InvalidIdentifier`] if the string is not shaped like
    /// an absolute URI (scheme, colon, non-empty remainder, no whitespace).
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if ABSOLUTE_URI.is_match(&uri) {
            Ok(Self(uri))
        } else {
            Err(Error::InvalidIdentifier(uri))
        }
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;

    fn try_from(uri: &str) -> Result<Self> {
        Self::new(uri)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
