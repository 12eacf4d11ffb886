//! Language-map labels.
//!
//! IIIF Presentation 3.0 expresses all human-readable text as a mapping from
//! a language tag to an ordered list of strings, even when the caller only
//! has a single `(tag, value)` pair. [`Label`] performs that normalization as
//! a pure function of its inputs; insertion order of both tags and values is
//! preserved through serialization.

use indexmap::IndexMap;
use serde::Serialize;

/// A localized text property: language tag mapped to an ordered string list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Label {
    entries: IndexMap<String, Vec<String>>,
}

impl Label {
    /// Create a label from a single language tag and value.
    ///
    /// The pair is normalized into the language-map form, e.g.
    /// `Label::new("en", "Image 1")` serializes as `{"en": ["Image 1"]}`.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(tag.into(), vec![value.into()]);
        Self { entries }
    }

    /// Create a label carrying multiple values under one language tag.
    pub fn with_strings(tag: impl Into<String>, values: Vec<String>) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(tag.into(), values);
        Self { entries }
    }

    /// Append a value under a language tag, creating the tag if absent.
    pub fn add(&mut self, tag: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.entry(tag.into()).or_default().push(value.into());
        self
    }

    /// Get the values for a language tag.
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.entries.get(tag).map(Vec::as_slice)
    }

    /// Iterate over `(tag, values)` entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether the label has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<(&str, &str)> for Label {
    fn from((tag, value): (&str, &str)) -> Self {
        Self::new(tag, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair_normalizes_to_map() {
        let label = Label::new("en", "Single Image Example");
        assert_eq!(label.get("en"), Some(&["Single Image Example".to_string()][..]));
    }

    #[test]
    fn test_add_preserves_value_order() {
        let mut label = Label::new("en", "first");
        label.add("en", "second").add("en", "third");
        assert_eq!(
            label.get("en").unwrap(),
            &["first".to_string(), "second".to_string(), "third".to_string()]
        );
    }

    #[test]
    fn test_tag_insertion_order_preserved() {
        let mut label = Label::new("en", "hello");
        label.add("fr", "bonjour").add("de", "hallo");
        let tags: Vec<&str> = label.entries().map(|(t, _)| t).collect();
        assert_eq!(tags, vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_serializes_as_language_map() {
        let label = Label::new("en", "Image 1");
        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json, serde_json::json!({"en": ["Image 1"]}));
    }
}
