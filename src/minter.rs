//! Intra-manifest identifier minting.
//!
//! A [`Minter`] is bound to one manifest identifier and derives stable,
//! unique identifiers for the substructures the caller did not address
//! explicitly. Derivation is deterministic: each kind gets a path segment
//! plus a monotonically increasing counter scoped to its parent, so the first
//! canvas under a manifest is `{base}/canvas/p1`, the first annotation page
//! under that canvas is `{base}/page/p1/1`, and so on. Counters are scoped
//! per parent; two canvases can each receive their own first page without
//! colliding.
//!
//! Externally supplied identifiers can be registered with [`Minter::record`]
//! so that future mints skip over them. Minting requires `&mut self`; sharing
//! a minter across threads therefore needs an external `Mutex`, which is the
//! only synchronization the single-threaded construction model calls for.

use crate::error::{Error, Result};
use crate::identifier::Identifier;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;

lazy_static! {
    /// Ordinal embedded in a minted canvas identifier.
    static ref CANVAS_ORDINAL: Regex = Regex::new(r"/canvas/p(\d+)$").unwrap();
    /// Canvas ordinal embedded in a minted annotation page identifier.
    static ref PAGE_ORDINAL: Regex = Regex::new(r"/page/p(\d+)/\d+$").unwrap();
}

/// The kinds of substructure identifier a minter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MintKind {
    /// A canvas under the manifest
    Canvas,
    /// An annotation page under a canvas
    AnnotationPage,
    /// A painting annotation under an annotation page
    Annotation,
}

impl fmt::Display for MintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintKind::Canvas => f.write_str("Canvas"),
            MintKind::AnnotationPage => f.write_str("AnnotationPage"),
            MintKind::Annotation => f.write_str("Annotation"),
        }
    }
}

/// Mints intra-manifest identifiers using predictable templates.
///
/// A minter holds a non-owning back-reference to its manifest (the manifest
/// identifier) for uniqueness bookkeeping. It never owns manifest
/// substructures.
#[derive(Debug, Clone)]
pub struct Minter {
    /// Identifier of the manifest this minter is bound to
    manifest_id: Identifier,
    /// Last counter value handed out, per (kind, parent) scope
    counts: HashMap<(MintKind, Identifier), u64>,
    /// Ordinal assigned to each parent, used in page/annotation templates
    ordinals: HashMap<Identifier, u64>,
    /// Every identifier this minter has produced or been told about
    recorded: HashSet<Identifier>,
}

impl Minter {
    /// Create a minter bound to a manifest identifier.
    ///
    /// A minter created this way knows nothing about identifiers already in
    /// the manifest; use `Manifest::minter` to pre-record an existing
    /// subtree, or [`Minter::record`] to register ids one at a time.
    pub fn new(manifest_id: Identifier) -> Self {
        Self {
            manifest_id,
            counts: HashMap::new(),
            ordinals: HashMap::new(),
            recorded: HashSet::new(),
        }
    }

    /// Get the manifest identifier this minter is bound to.
    pub fn manifest_id(&self) -> &Identifier {
        &self.manifest_id
    }

    /// Register an externally supplied identifier.
    ///
    /// Future mints in the same scope skip over recorded values, so an
    /// explicit id can never collide with a later auto-minted one. Recording
    /// the same identifier twice is logged but not an error; the collision,
    /// if real, surfaces as `DuplicateIdentifier` when the second entity is
    /// attached.
    pub fn record(&mut self, id: &Identifier) {
        if !self.recorded.insert(id.clone()) {
            log::warn!("identifier {} was already recorded with this minter", id);
        }
    }

    /// Whether this minter has produced or recorded the given identifier.
    pub fn knows(&self, id: &Identifier) -> bool {
        self.recorded.contains(id)
    }

    /// The last counter value handed out for a `(kind, owner)` scope, or
    /// zero if nothing has been minted there yet.
    pub fn count(&self, kind: MintKind, owner: &Identifier) -> u64 {
        self.counts
            .get(&(kind, owner.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Mint a new identifier of `kind` under `owner`.
    ///
    /// The owner is the manifest identifier for canvases, the canvas
    /// identifier for annotation pages, and the page identifier for
    /// annotations. Each call for a new element advances the counter scoped
    /// to `(kind, owner)`; values that collide with a recorded identifier are
    /// skipped. Minting a canvas id with an owner other than the bound
    /// manifest returns [`Error::UnboundMinter`].
    pub fn mint(&mut self, kind: MintKind, owner: &Identifier) -> Result<Identifier> {
        if kind == MintKind::Canvas && owner != &self.manifest_id {
            return Err(Error::UnboundMinter {
                minter: self.manifest_id.clone(),
                manifest: owner.clone(),
            });
        }

        let ordinal = match kind {
            MintKind::Canvas => 0, // unused in the canvas template
            _ => self.owner_ordinal(owner),
        };

        let scope = (kind, owner.clone());
        let mut count = self
            .counts
            .get(&scope)
            .copied()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(Error::MintingExhausted(kind))?;

        loop {
            let uri = match kind {
                MintKind::Canvas => format!("{}/canvas/p{}", self.manifest_id, count),
                MintKind::AnnotationPage => {
                    format!("{}/page/p{}/{}", self.manifest_id, ordinal, count)
                },
                MintKind::Annotation => {
                    format!("{}/annotation/p{}/{}", self.manifest_id, ordinal, count)
                },
            };
            let id = Identifier::new(uri)?;

            if self.recorded.insert(id.clone()) {
                self.counts.insert(scope, count);
                return Ok(id);
            }

            // A recorded explicit id occupies this counter value; skip it.
            log::debug!("minted id {} already recorded, advancing counter", id);
            count = count.checked_add(1).ok_or(Error::MintingExhausted(kind))?;
        }
    }

    /// Mint an identifier for a canvas under the bound manifest.
    pub fn mint_canvas_id(&mut self) -> Result<Identifier> {
        let owner = self.manifest_id.clone();
        self.mint(MintKind::Canvas, &owner)
    }

    /// Mint an identifier for an annotation page under the given canvas.
    pub fn mint_page_id(&mut self, canvas_id: &Identifier) -> Result<Identifier> {
        self.mint(MintKind::AnnotationPage, canvas_id)
    }

    /// Mint an identifier for an annotation under the given page.
    pub fn mint_annotation_id(&mut self, page_id: &Identifier) -> Result<Identifier> {
        self.mint(MintKind::Annotation, page_id)
    }

    /// The ordinal used in page and annotation templates for an owner.
    ///
    /// Minted canvas and page identifiers embed their ordinal, which is
    /// reused; any other owner gets the next free ordinal on first sight.
    fn owner_ordinal(&mut self, owner: &Identifier) -> u64 {
        if let Some(ordinal) = self.ordinals.get(owner) {
            return *ordinal;
        }

        let extracted = CANVAS_ORDINAL
            .captures(owner.as_str())
            .or_else(|| PAGE_ORDINAL.captures(owner.as_str()))
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok());
        let ordinal = extracted.unwrap_or(self.ordinals.len() as u64 + 1);

        self.ordinals.insert(owner.clone(), ordinal);
        ordinal
    }
}
