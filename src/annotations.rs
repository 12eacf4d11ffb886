//! Painting annotations and annotation pages.
//!
//! Content reaches a canvas only through the chain annotation page →
//! painting annotation → content body (IIIF Presentation API 3.0,
//! Section 3.4). This module holds the chain's middle links: [`Target`]
//! (canvas identifier plus optional fragment selector), [`PaintingAnnotation`]
//! (motivation `painting`, one body or a choice of bodies), and
//! [`AnnotationPage`] (an ordered, append-only annotation container owned by
//! exactly one canvas).

use crate::canvas::Canvas;
use crate::content::ContentResource;
use crate::error::{Error, Result};
use crate::identifier::Identifier;
use std::fmt;

/// The target of a painting annotation: a canvas, optionally narrowed to a
/// spatial (`xywh=x,y,w,h`) or temporal (`t=start,end`) fragment.
///
/// The fragment is treated as an opaque suffix; its grammar is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    id: Identifier,
    fragment: Option<String>,
}

impl Target {
    /// Create a target referencing a whole canvas.
    pub fn new(id: Identifier) -> Self {
        Self { id, fragment: None }
    }

    /// Create a target referencing a fragment of a canvas.
    pub fn with_fragment(id: Identifier, fragment: impl Into<String>) -> Self {
        Self {
            id,
            fragment: Some(fragment.into()),
        }
    }

    /// Get the canvas identifier this target references.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Get the fragment selector, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Render the target as a URI string, `{id}` or `{id}#{fragment}`.
    pub fn uri(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{}#{}", self.id, fragment),
            None => self.id.to_string(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

impl From<Identifier> for Target {
    fn from(id: Identifier) -> Self {
        Self::new(id)
    }
}

/// An annotation that paints content resources onto a canvas.
///
/// The annotation references its bodies; it does not own them. Multiple
/// bodies express a choice (any one of them may be rendered), never
/// sequential painting. Setting the target and adding bodies commute: neither
/// erases the other.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintingAnnotation {
    id: Identifier,
    target: Target,
    bodies: Vec<ContentResource>,
}

impl PaintingAnnotation {
    /// Create a painting annotation targeting a whole canvas.
    pub fn new(id: Identifier, canvas: &Canvas) -> Self {
        Self {
            id,
            target: Target::new(canvas.id().clone()),
            bodies: Vec::new(),
        }
    }

    /// Create a painting annotation targeting a fragment of a canvas.
    pub fn with_fragment(id: Identifier, canvas: &Canvas, fragment: impl Into<String>) -> Self {
        Self {
            id,
            target: Target::with_fragment(canvas.id().clone(), fragment),
            bodies: Vec::new(),
        }
    }

    /// Get the annotation identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Get the annotation target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Replace the annotation target. Bodies are untouched.
    pub fn set_target(&mut self, target: Target) -> &mut Self {
        self.target = target;
        self
    }

    /// Append a content resource to the annotation body. The target is
    /// untouched.
    pub fn add_body(&mut self, body: impl Into<ContentResource>) -> &mut Self {
        self.bodies.push(body.into());
        self
    }

    /// Append several content resources to the annotation body.
    pub fn add_bodies(&mut self, bodies: Vec<ContentResource>) -> &mut Self {
        self.bodies.extend(bodies);
        self
    }

    /// Get the annotation bodies in the order they were added.
    pub fn bodies(&self) -> &[ContentResource] {
        &self.bodies
    }

    /// Whether the body serializes as a choice (more than one resource).
    pub fn body_is_choice(&self) -> bool {
        self.bodies.len() > 1
    }
}

/// An ordered container of painting annotations, owned by exactly one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPage {
    id: Identifier,
    annotations: Vec<PaintingAnnotation>,
}

impl AnnotationPage {
    /// Create an empty annotation page.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            annotations: Vec::new(),
        }
    }

    /// Get the page identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Get the page's annotations in append order.
    pub fn annotations(&self) -> &[PaintingAnnotation] {
        &self.annotations
    }

    /// Append annotations to the page.
    ///
    /// Append-only: prior annotations are never replaced, and appending the
    /// same annotation value twice yields two entries. A *different*
    /// annotation that reuses a sibling's identifier is rejected with
    /// [`Error::DuplicateIdentifier`]; on rejection the page is unmodified.
    pub fn add_annotations(&mut self, annotations: Vec<PaintingAnnotation>) -> Result<&mut Self> {
        for (index, annotation) in annotations.iter().enumerate() {
            let conflict = self
                .annotations
                .iter()
                .chain(annotations[..index].iter())
                .any(|prior| prior.id() == annotation.id() && prior != annotation);
            if conflict {
                return Err(Error::DuplicateIdentifier(annotation.id().clone()));
            }
        }

        self.annotations.extend(annotations);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageContent;

    fn id(uri: &str) -> Identifier {
        Identifier::new(uri).unwrap()
    }

    fn canvas() -> Canvas {
        Canvas::new(id("https://example.com/canvas/p1"))
    }

    fn image(uri: &str) -> ContentResource {
        ImageContent::new(id(uri)).into()
    }

    #[test]
    fn test_target_without_fragment_equals_canvas_id() {
        let target = Target::new(id("https://example.com/canvas/p1"));
        assert_eq!(target.uri(), "https://example.com/canvas/p1");
    }

    #[test]
    fn test_target_fragment_suffix() {
        let target =
            Target::with_fragment(id("https://example.com/canvas/p1"), "xywh=0,0,6200,4842");
        assert_eq!(target.uri(), "https://example.com/canvas/p1#xywh=0,0,6200,4842");
    }

    #[test]
    fn test_body_and_target_commute() {
        let canvas = canvas();
        let mut body_first = PaintingAnnotation::new(id("https://example.com/anno/1"), &canvas);
        body_first
            .add_body(image("https://example.com/full.jpg"))
            .set_target(Target::with_fragment(canvas.id().clone(), "t=0,10"));

        let mut target_first = PaintingAnnotation::new(id("https://example.com/anno/1"), &canvas);
        target_first
            .set_target(Target::with_fragment(canvas.id().clone(), "t=0,10"))
            .add_body(image("https://example.com/full.jpg"));

        assert_eq!(body_first, target_first);
    }

    #[test]
    fn test_single_body_is_not_choice() {
        let canvas = canvas();
        let mut annotation = PaintingAnnotation::new(id("https://example.com/anno/1"), &canvas);
        annotation.add_body(image("https://example.com/a.jpg"));
        assert!(!annotation.body_is_choice());
        annotation.add_body(image("https://example.com/b.jpg"));
        assert!(annotation.body_is_choice());
    }

    #[test]
    fn test_append_same_annotation_twice_keeps_both() {
        let canvas = canvas();
        let annotation = PaintingAnnotation::new(id("https://example.com/anno/1"), &canvas);
        let mut page = AnnotationPage::new(id("https://example.com/page/p1/1"));
        page.add_annotations(vec![annotation.clone()]).unwrap();
        page.add_annotations(vec![annotation]).unwrap();
        assert_eq!(page.annotations().len(), 2);
    }

    #[test]
    fn test_conflicting_annotation_with_same_id_rejected() {
        let canvas = canvas();
        let first = PaintingAnnotation::new(id("https://example.com/anno/1"), &canvas);
        let mut second = PaintingAnnotation::new(id("https://example.com/anno/1"), &canvas);
        second.add_body(image("https://example.com/a.jpg"));

        let mut page = AnnotationPage::new(id("https://example.com/page/p1/1"));
        page.add_annotations(vec![first]).unwrap();
        let err = page.add_annotations(vec![second]).unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier(_)));
        assert_eq!(page.annotations().len(), 1);
    }
}
