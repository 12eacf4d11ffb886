//! Manifests.
//!
//! The manifest is the top-level aggregate of a IIIF Presentation 3.0
//! document: an identifier, a language-map label, and the ordered canvas
//! sequence. Canvas order is presentation order and is preserved through
//! every mutation; `add_canvases` appends and `set_canvases` substitutes the
//! whole sequence.

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::identifier::Identifier;
use crate::label::Label;
use crate::minter::Minter;
use crate::serializer::ManifestSerializer;
use serde_json::Value;
use std::fmt;

/// A IIIF Presentation 3.0 manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    id: Identifier,
    label: Label,
    canvases: Vec<Canvas>,
}

impl Manifest {
    /// Create a manifest with an identifier and label.
    pub fn new(id: Identifier, label: Label) -> Self {
        Self {
            id,
            label,
            canvases: Vec::new(),
        }
    }

    /// Get the manifest identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Get the manifest label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Get the canvases in presentation order.
    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    /// Replace the manifest label.
    pub fn set_label(&mut self, label: Label) -> &mut Self {
        self.label = label;
        self
    }

    /// Create a minter bound to this manifest.
    ///
    /// Identifiers already present in the manifest's subtree are recorded so
    /// that later mints skip over them.
    pub fn minter(&self) -> Minter {
        let mut minter = Minter::new(self.id.clone());
        for canvas in &self.canvases {
            minter.record(canvas.id());
            for page in canvas.painting_pages() {
                minter.record(page.id());
                for annotation in page.annotations() {
                    minter.record(annotation.id());
                }
            }
        }
        minter
    }

    /// Append canvases to the manifest.
    ///
    /// Each canvas id must be unique within the document
    /// ([`Error::DuplicateIdentifier`]), and a canvas whose id was minted for
    /// a different manifest is rejected ([`Error::UnboundMinter`]). On
    /// failure the manifest is unmodified.
    pub fn add_canvases(&mut self, canvases: Vec<Canvas>) -> Result<&mut Self> {
        self.validate_canvases(&self.canvases, &canvases)?;
        self.canvases.extend(canvases);
        Ok(self)
    }

    /// Replace the manifest's entire canvas sequence atomically.
    pub fn set_canvases(&mut self, canvases: Vec<Canvas>) -> Result<&mut Self> {
        self.validate_canvases(&[], &canvases)?;
        self.canvases = canvases;
        Ok(self)
    }

    /// Serialize to a canonical JSON-LD value.
    pub fn to_json(&self) -> Value {
        ManifestSerializer::new(self).to_json()
    }

    /// Serialize to compact canonical JSON-LD text.
    pub fn serialize(&self) -> String {
        ManifestSerializer::new(self).serialize()
    }

    fn validate_canvases(&self, existing: &[Canvas], incoming: &[Canvas]) -> Result<()> {
        for (index, canvas) in incoming.iter().enumerate() {
            if let Some(scope) = canvas.minted_scope() {
                if scope != &self.id {
                    return Err(Error::UnboundMinter {
                        minter: scope.clone(),
                        manifest: self.id.clone(),
                    });
                }
            }

            let duplicate = existing
                .iter()
                .chain(incoming[..index].iter())
                .any(|prior| prior.id() == canvas.id());
            if duplicate {
                return Err(Error::DuplicateIdentifier(canvas.id().clone()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Manifest {
    /// Pretty-printed canonical JSON-LD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ManifestSerializer::new(self).to_string_pretty())
    }
}
