//! The annotation painting operation.
//!
//! [`Painter::paint`] is the explicit form of attaching content to a canvas:
//! given the canvas, a caller-held annotation page, an annotation identifier,
//! a target, and one or more content resources, it builds a well-formed
//! painting annotation and appends it to the page. `Canvas::paint_with` is
//! sugar over this operation that also mints the page and annotation
//! identifiers and attaches the page.
//!
//! Batching several paint calls onto one page is done here, by threading the
//! same page through repeated `paint` calls before attaching it.

use crate::annotations::{AnnotationPage, PaintingAnnotation, Target};
use crate::canvas::Canvas;
use crate::content::ContentResource;
use crate::error::{Error, Result};
use crate::identifier::Identifier;

/// Builds painting annotations onto annotation pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter;

impl Painter {
    /// Paint content resources onto `canvas` through `page`.
    ///
    /// The target must reference the canvas's identifier (the fragment, if
    /// any, is ignored for the comparison); otherwise
    /// [`Error::MalformedTarget`] is returned and the page is unmodified.
    /// A single resource becomes the annotation body directly; several
    /// resources become a choice body. At least one resource is required.
    pub fn paint(
        canvas: &Canvas,
        page: &mut AnnotationPage,
        annotation_id: Identifier,
        target: Target,
        bodies: Vec<ContentResource>,
    ) -> Result<()> {
        if target.id() != canvas.id() {
            return Err(Error::MalformedTarget {
                target: target.id().clone(),
                canvas: canvas.id().clone(),
            });
        }

        if bodies.is_empty() {
            return Err(Error::Validation(
                "a painting annotation requires at least one content resource".to_string(),
            ));
        }

        let mut annotation = PaintingAnnotation::new(annotation_id, canvas);
        annotation.set_target(target).add_bodies(bodies);
        page.add_annotations(vec![annotation])?;

        Ok(())
    }
}
