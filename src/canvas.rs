//! Canvases.
//!
//! A canvas is the virtual frame content is painted onto (IIIF Presentation
//! API 3.0, Section 3.3). It may declare spatial dimensions, a temporal
//! duration, or both (video), but never only one of width/height — and a
//! canvas that carries paintable content must declare at least one kind of
//! extent. The canvas exclusively owns its annotation pages.

use crate::annotations::{AnnotationPage, Target};
use crate::content::ContentResource;
use crate::error::{Error, Result};
use crate::identifier::Identifier;
use crate::label::Label;
use crate::minter::Minter;
use crate::painter::Painter;
use crate::utils::{check_duration, check_width_height};

/// A spatial/temporal frame onto which content resources are painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    id: Identifier,
    label: Option<Label>,
    /// Width and height are a unit: both present or both absent.
    dimensions: Option<(u32, u32)>,
    duration: Option<f64>,
    painting_pages: Vec<AnnotationPage>,
    /// Manifest id of the minter that produced this canvas's id, if any.
    scope: Option<Identifier>,
}

impl Canvas {
    /// Create a canvas with an explicit identifier.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            label: None,
            dimensions: None,
            duration: None,
            painting_pages: Vec::new(),
            scope: None,
        }
    }

    /// Create a canvas with an identifier minted for the bound manifest.
    pub fn with_minter(minter: &mut Minter) -> Result<Self> {
        let id = minter.mint_canvas_id()?;
        let mut canvas = Self::new(id);
        canvas.scope = Some(minter.manifest_id().clone());
        Ok(canvas)
    }

    /// Get the canvas identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Get the canvas label, if set.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Get the canvas width in pixels, if spatial dimensions are set.
    pub fn width(&self) -> Option<u32> {
        self.dimensions.map(|(w, _)| w)
    }

    /// Get the canvas height in pixels, if spatial dimensions are set.
    pub fn height(&self) -> Option<u32> {
        self.dimensions.map(|(_, h)| h)
    }

    /// Get the canvas duration in seconds, if set.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Get the painting annotation pages in attach order.
    pub fn painting_pages(&self) -> &[AnnotationPage] {
        &self.painting_pages
    }

    /// Manifest scope recorded at mint time, used for unbound-minter checks.
    pub(crate) fn minted_scope(&self) -> Option<&Identifier> {
        self.scope.as_ref()
    }

    /// Set the canvas label.
    pub fn set_label(&mut self, label: Label) -> &mut Self {
        self.label = Some(label);
        self
    }

    /// Set the canvas label, consuming form for construction chains.
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the canvas width and height. Both must be greater than zero; a
    /// partial pair is unrepresentable through this API.
    pub fn set_width_height(&mut self, width: u32, height: u32) -> Result<&mut Self> {
        self.dimensions = Some(check_width_height(width, height)?);
        Ok(self)
    }

    /// Set width and height, consuming form for construction chains.
    pub fn with_width_height(mut self, width: u32, height: u32) -> Result<Self> {
        self.set_width_height(width, height)?;
        Ok(self)
    }

    /// Set the canvas duration in seconds. Must be positive and finite.
    pub fn set_duration(&mut self, duration: f64) -> Result<&mut Self> {
        self.duration = Some(check_duration(duration)?);
        Ok(self)
    }

    /// Set the duration, consuming form for construction chains.
    pub fn with_duration(mut self, duration: f64) -> Result<Self> {
        self.set_duration(duration)?;
        Ok(self)
    }

    /// Paint content onto the whole canvas.
    ///
    /// Mints a fresh annotation page and annotation id from `minter`, targets
    /// this canvas with no fragment, and appends the page. One page is
    /// created per call; to batch several annotations onto a shared page,
    /// thread an explicit page through [`Painter::paint`] and attach it with
    /// [`Canvas::add_painting_pages`].
    pub fn paint_with(
        &mut self,
        minter: &mut Minter,
        bodies: Vec<ContentResource>,
    ) -> Result<&mut Self> {
        self.paint(minter, None, bodies)
    }

    /// Paint content onto a fragment of the canvas, e.g. `xywh=0,0,100,100`
    /// or `t=0,30`. The fragment string is carried verbatim.
    pub fn paint_with_fragment(
        &mut self,
        minter: &mut Minter,
        fragment: &str,
        bodies: Vec<ContentResource>,
    ) -> Result<&mut Self> {
        self.paint(minter, Some(fragment), bodies)
    }

    fn paint(
        &mut self,
        minter: &mut Minter,
        fragment: Option<&str>,
        bodies: Vec<ContentResource>,
    ) -> Result<&mut Self> {
        if let Some(scope) = &self.scope {
            if scope != minter.manifest_id() {
                return Err(Error::UnboundMinter {
                    minter: minter.manifest_id().clone(),
                    manifest: scope.clone(),
                });
            }
        }
        if bodies.is_empty() {
            return Err(Error::Validation(
                "a painting annotation requires at least one content resource".to_string(),
            ));
        }
        if self.dimensions.is_none() && self.duration.is_none() {
            return Err(Error::Validation(format!(
                "canvas {} declares neither spatial dimensions nor a duration but is being painted",
                self.id
            )));
        }
        for body in &bodies {
            self.can_frame(body)?;
        }

        let page_id = minter.mint_page_id(&self.id)?;
        let annotation_id = minter.mint_annotation_id(&page_id)?;
        let mut page = AnnotationPage::new(page_id);

        let target = match fragment {
            Some(fragment) => Target::with_fragment(self.id.clone(), fragment),
            None => Target::new(self.id.clone()),
        };
        Painter::paint(self, &mut page, annotation_id, target, bodies)?;

        self.add_painting_pages(vec![page])
    }

    /// Append annotation pages to the canvas.
    ///
    /// Each page's identifier must be distinct from its siblings'
    /// ([`Error::DuplicateIdentifier`]), every annotation on it must target
    /// this canvas ([`Error::MalformedTarget`]), and a canvas without any
    /// extent cannot accept pages carrying bodies. On failure the canvas is
    /// unmodified.
    pub fn add_painting_pages(&mut self, pages: Vec<AnnotationPage>) -> Result<&mut Self> {
        self.validate_pages(&self.painting_pages, &pages)?;
        self.painting_pages.extend(pages);
        Ok(self)
    }

    /// Replace the canvas's entire page sequence atomically.
    ///
    /// The replacement list is validated as a whole before any mutation;
    /// on failure the previous sequence is left in place.
    pub fn set_painting_pages(&mut self, pages: Vec<AnnotationPage>) -> Result<&mut Self> {
        self.validate_pages(&[], &pages)?;
        self.painting_pages = pages;
        Ok(self)
    }

    fn validate_pages(&self, existing: &[AnnotationPage], incoming: &[AnnotationPage]) -> Result<()> {
        for (index, page) in incoming.iter().enumerate() {
            let duplicate = existing
                .iter()
                .chain(incoming[..index].iter())
                .any(|prior| prior.id() == page.id());
            if duplicate {
                return Err(Error::DuplicateIdentifier(page.id().clone()));
            }

            for annotation in page.annotations() {
                if annotation.target().id() != &self.id {
                    return Err(Error::MalformedTarget {
                        target: annotation.target().id().clone(),
                        canvas: self.id.clone(),
                    });
                }
                for body in annotation.bodies() {
                    self.can_frame(body)?;
                }
            }
        }

        Ok(())
    }

    /// Check that a content resource fits within this canvas's extent.
    ///
    /// Spatial content (images, video) requires the canvas to declare
    /// dimensions, and declared content dimensions must not exceed them;
    /// temporal content (sound, video) requires a canvas duration the
    /// content's duration does not exceed. Region bounds of a fragment
    /// target are not checked.
    fn can_frame(&self, content: &ContentResource) -> Result<()> {
        let out_of_bounds = |reason: String| Error::ContentOutOfBounds {
            content: content.id().clone(),
            canvas: self.id.clone(),
            reason,
        };

        let spatial = matches!(
            content,
            ContentResource::Image(_) | ContentResource::Video(_)
        );
        let temporal = matches!(
            content,
            ContentResource::Sound(_) | ContentResource::Video(_)
        );

        if spatial {
            match self.dimensions {
                None => {
                    return Err(out_of_bounds(
                        "canvas declares no spatial dimensions for spatial content".to_string(),
                    ));
                },
                Some((canvas_width, canvas_height)) => {
                    if let Some((width, height)) = content.dimensions() {
                        if width > canvas_width || height > canvas_height {
                            return Err(out_of_bounds(format!(
                                "content {}x{} exceeds canvas {}x{}",
                                width, height, canvas_width, canvas_height
                            )));
                        }
                    }
                },
            }
        }

        if temporal {
            match self.duration {
                None => {
                    return Err(out_of_bounds(
                        "canvas declares no duration for temporal content".to_string(),
                    ));
                },
                Some(canvas_duration) => {
                    if let Some(duration) = content.duration() {
                        if duration > canvas_duration {
                            return Err(out_of_bounds(format!(
                                "content duration {} exceeds canvas duration {}",
                                duration, canvas_duration
                            )));
                        }
                    }
                },
            }
        }

        Ok(())
    }
}
