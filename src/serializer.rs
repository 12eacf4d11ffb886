//! Canonical JSON-LD serialization.
//!
//! Serializes a manifest graph to the IIIF Presentation API 3.0 JSON-LD
//! shape. The walk is pure and read-only; property order is fixed per
//! resource type and empty or absent fields are omitted, so the same input
//! graph always produces byte-identical output. `serde_json` is built with
//! `preserve_order` so map insertion order survives into the emitted text.

use crate::annotations::{AnnotationPage, PaintingAnnotation};
use crate::canvas::Canvas;
use crate::content::ContentResource;
use crate::label::Label;
use crate::manifest::Manifest;
use serde_json::{json, Map, Value};

/// The IIIF Presentation API 3.0 context URI.
pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

/// Serializer for a manifest object graph.
///
/// Holds only a shared reference; serializing concurrently with other reads
/// of a frozen graph is safe.
#[derive(Debug, Clone, Copy)]
pub struct ManifestSerializer<'a> {
    manifest: &'a Manifest,
}

impl<'a> ManifestSerializer<'a> {
    /// Create a serializer over a manifest.
    pub fn new(manifest: &'a Manifest) -> Self {
        Self { manifest }
    }

    /// Produce the canonical JSON-LD document as a JSON value.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("@context".to_string(), json!(PRESENTATION_CONTEXT));
        object.insert("id".to_string(), json!(self.manifest.id()));
        object.insert("type".to_string(), json!("Manifest"));
        object.insert("label".to_string(), label_json(self.manifest.label()));
        object.insert(
            "items".to_string(),
            Value::Array(self.manifest.canvases().iter().map(canvas_json).collect()),
        );
        Value::Object(object)
    }

    /// Produce compact canonical JSON-LD text.
    pub fn serialize(&self) -> String {
        self.to_json().to_string()
    }

    /// Produce pretty-printed canonical JSON-LD text.
    pub fn to_string_pretty(&self) -> String {
        // Pretty printing over an already-ordered value stays deterministic.
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }
}

fn label_json(label: &Label) -> Value {
    let mut map = Map::new();
    for (tag, values) in label.entries() {
        map.insert(tag.to_string(), json!(values));
    }
    Value::Object(map)
}

fn canvas_json(canvas: &Canvas) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(canvas.id()));
    object.insert("type".to_string(), json!("Canvas"));
    if let Some(label) = canvas.label() {
        object.insert("label".to_string(), label_json(label));
    }
    // Width and height are emitted together or not at all.
    if let (Some(width), Some(height)) = (canvas.width(), canvas.height()) {
        object.insert("width".to_string(), json!(width));
        object.insert("height".to_string(), json!(height));
    }
    if let Some(duration) = canvas.duration() {
        object.insert("duration".to_string(), json!(duration));
    }
    if !canvas.painting_pages().is_empty() {
        object.insert(
            "items".to_string(),
            Value::Array(canvas.painting_pages().iter().map(page_json).collect()),
        );
    }
    Value::Object(object)
}

fn page_json(page: &AnnotationPage) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(page.id()));
    object.insert("type".to_string(), json!("AnnotationPage"));
    object.insert(
        "items".to_string(),
        Value::Array(page.annotations().iter().map(annotation_json).collect()),
    );
    Value::Object(object)
}

fn annotation_json(annotation: &PaintingAnnotation) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(annotation.id()));
    object.insert("type".to_string(), json!("Annotation"));
    object.insert("motivation".to_string(), json!("painting"));
    match annotation.bodies() {
        [] => {},
        [body] => {
            object.insert("body".to_string(), resource_json(body));
        },
        bodies => {
            object.insert(
                "body".to_string(),
                json!({
                    "type": "Choice",
                    "items": bodies.iter().map(resource_json).collect::<Vec<Value>>()
                }),
            );
        },
    }
    object.insert("target".to_string(), json!(annotation.target().uri()));
    Value::Object(object)
}

fn resource_json(resource: &ContentResource) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!(resource.id()));
    object.insert("type".to_string(), json!(resource.type_name()));
    if let Some(format) = resource.format() {
        object.insert("format".to_string(), json!(format));
    }
    if let Some(label) = resource.label() {
        object.insert("label".to_string(), label_json(label));
    }
    if let Some((width, height)) = resource.dimensions() {
        object.insert("width".to_string(), json!(width));
        object.insert("height".to_string(), json!(height));
    }
    if let Some(duration) = resource.duration() {
        object.insert("duration".to_string(), json!(duration));
    }
    if !resource.services().is_empty() {
        object.insert("service".to_string(), json!(resource.services()));
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ImageContent, SoundContent};
    use crate::identifier::Identifier;

    const MANIFEST: &str = "https://example.com/iiif/book1/manifest";

    fn id(uri: &str) -> Identifier {
        Identifier::new(uri).unwrap()
    }

    fn image(uri: &str) -> ContentResource {
        ImageContent::new(id(uri)).into()
    }

    #[test]
    fn test_manifest_key_order() {
        let manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        let json = manifest.to_json();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["@context", "id", "type", "label", "items"]);
    }

    #[test]
    fn test_canvas_omits_absent_fields() {
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        manifest
            .add_canvases(vec![Canvas::new(id("https://example.com/canvas/p1"))])
            .unwrap();
        let json = manifest.to_json();
        let canvas = &json["items"][0];
        let keys: Vec<&String> = canvas.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "type"]);
    }

    #[test]
    fn test_canvas_emits_width_and_height_together() {
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        let canvas = Canvas::new(id("https://example.com/canvas/p1"))
            .with_width_height(1200, 1800)
            .unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();
        let json = manifest.to_json();
        assert_eq!(json["items"][0]["width"], json!(1200));
        assert_eq!(json["items"][0]["height"], json!(1800));
    }

    #[test]
    fn test_single_body_is_object_not_choice() {
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        let mut minter = manifest.minter();
        let mut canvas = Canvas::with_minter(&mut minter)
            .unwrap()
            .with_width_height(1200, 1800)
            .unwrap();
        canvas
            .paint_with(&mut minter, vec![image("https://example.com/full.jpg")])
            .unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();

        let json = manifest.to_json();
        let annotation = &json["items"][0]["items"][0]["items"][0];
        assert_eq!(annotation["motivation"], json!("painting"));
        assert_eq!(annotation["body"]["type"], json!("Image"));
        assert!(annotation["body"].get("items").is_none());
    }

    #[test]
    fn test_choice_body_wraps_items() {
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        let mut minter = manifest.minter();
        let mut canvas = Canvas::with_minter(&mut minter)
            .unwrap()
            .with_width_height(1200, 1800)
            .unwrap();
        canvas
            .paint_with(
                &mut minter,
                vec![
                    image("https://example.com/color.jpg"),
                    image("https://example.com/gray.jpg"),
                ],
            )
            .unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();

        let body = &manifest.to_json()["items"][0]["items"][0]["items"][0]["body"];
        assert_eq!(body["type"], json!("Choice"));
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_sound_body_omits_dimensions() {
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Audio"));
        let mut minter = manifest.minter();
        let mut canvas = Canvas::with_minter(&mut minter)
            .unwrap()
            .with_duration(1985.024)
            .unwrap();
        let sound = SoundContent::new(id("https://example.com/audio.mp4"))
            .duration(1985.024)
            .unwrap();
        canvas.paint_with(&mut minter, vec![sound.into()]).unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();

        let body = &manifest.to_json()["items"][0]["items"][0]["items"][0]["body"];
        assert_eq!(body["duration"], json!(1985.024));
        assert!(body.get("width").is_none());
        assert!(body.get("height").is_none());
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        let mut minter = manifest.minter();
        let mut canvas = Canvas::with_minter(&mut minter)
            .unwrap()
            .with_width_height(1200, 1800)
            .unwrap();
        canvas
            .paint_with(&mut minter, vec![image("https://example.com/full.jpg")])
            .unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();

        assert_eq!(manifest.serialize(), manifest.serialize());
        assert_eq!(format!("{}", manifest), format!("{}", manifest));
    }

    #[test]
    fn test_service_descriptors_emitted_verbatim() {
        let service = json!({
            "id": "https://example.com/iiif/image/full",
            "type": "ImageService3",
            "profile": "level1"
        });
        let mut manifest = Manifest::new(id(MANIFEST), Label::new("en", "Book 1"));
        let mut minter = manifest.minter();
        let mut canvas = Canvas::with_minter(&mut minter)
            .unwrap()
            .with_width_height(1200, 1800)
            .unwrap();
        let body = ImageContent::new(id("https://example.com/full.jpg")).service(service.clone());
        canvas.paint_with(&mut minter, vec![body.into()]).unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();

        let emitted = &manifest.to_json()["items"][0]["items"][0]["items"][0]["body"]["service"];
        assert_eq!(emitted, &json!([service]));
    }
}
