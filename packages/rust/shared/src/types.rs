//! Core domain types for Docsmith element documentation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A single metadata annotation value: plain text or a list of texts.
///
/// Source formats disagree on cardinality (CSV cells are scalar, RDF
/// predicates may repeat), so both shapes are preserved verbatim for
/// front-matter pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The scalar text of this value: the text itself, or the first list
    /// entry. `None` for an empty list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::List(items) => items.first().map(String::as_str),
        }
    }

    /// True when there is no usable content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.iter().all(String::is_empty),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// ExtraFields
// ---------------------------------------------------------------------------

/// An ordered mapping of annotation keys to values.
///
/// Insertion order is source order and is preserved through to front-matter
/// serialization, which is why this is a keyed vector rather than a hash
/// map. Lookup is a linear probe; descriptors carry at most a few dozen
/// keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraFields(Vec<(String, FieldValue)>);

impl ExtraFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing entry with the same key in
    /// place (its position is kept).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar text for `key`, if present and non-empty.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ---------------------------------------------------------------------------
// ElementDescriptor
// ---------------------------------------------------------------------------

/// A normalized record describing one documented element.
///
/// Parsed once from the source metadata and immutable afterwards. `uri` and
/// `label` together determine the output file identity; `extra` carries all
/// format-specific annotations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Identifier, typically a dereferenceable URI ending in a short code.
    pub uri: String,
    /// Human-readable name. Records without one are dropped at parse time.
    pub label: String,
    /// All other annotations, preserved verbatim.
    #[serde(default)]
    pub extra: ExtraFields,
}

impl ElementDescriptor {
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
            extra: ExtraFields::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SectionMap
// ---------------------------------------------------------------------------

/// Sections of one generated response, keyed by section key.
///
/// Ephemeral: produced by the sectionizer, consumed immediately by the
/// document writer. Sections the generator did not produce are simply
/// absent; the writer falls back to each section's placeholder.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    inner: HashMap<String, String>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.inner.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Documentation profiles
// ---------------------------------------------------------------------------

/// Which documentation template a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocProfile {
    /// Per-element documentation, filed under its ISBD area folder.
    Element,
    /// Syntax Encoding Scheme documentation, filed under `SES/`.
    Ses,
}

impl DocProfile {
    /// The ordered section layout for this profile.
    ///
    /// Shared between the prompt builder and the document templates so the
    /// requested sections and the rendered sections cannot drift apart.
    pub fn sections(&self) -> &'static [SectionSpec] {
        match self {
            Self::Element => ELEMENT_SECTIONS,
            Self::Ses => SES_SECTIONS,
        }
    }
}

impl std::fmt::Display for DocProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Element => write!(f, "element"),
            Self::Ses => write!(f, "ses"),
        }
    }
}

impl std::str::FromStr for DocProfile {
    type Err = crate::error::DocsmithError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "element" => Ok(Self::Element),
            "ses" => Ok(Self::Ses),
            other => Err(crate::error::DocsmithError::validation(format!(
                "unknown profile '{other}' (expected: element, ses)"
            ))),
        }
    }
}

/// One named section of a generated document.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    /// Stable key used in the section map.
    pub key: &'static str,
    /// Heading text as it appears after `## ` in prose and templates.
    pub heading: &'static str,
    /// Rendered when the generator produced nothing for this section.
    pub placeholder: &'static str,
    /// CSS class of the `<div>` container wrapping the section body.
    pub container: &'static str,
}

/// Section layout for per-element documentation.
pub const ELEMENT_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        key: "element_reference",
        heading: "Element Reference",
        placeholder: "[To be completed: Official definition, domain, and range of this element]",
        container: "guid",
    },
    SectionSpec {
        key: "additional_information",
        heading: "Additional Information",
        placeholder: "[To be completed: Scope, purpose, and user tasks]",
        container: "guid",
    },
    SectionSpec {
        key: "element_values",
        heading: "Element Values",
        placeholder: "[To be completed: Usage rules, value constraints, and encoding schemes]",
        container: "guid",
    },
    SectionSpec {
        key: "examples",
        heading: "Examples",
        placeholder: "[To be completed: Practical examples in bibliographic records]",
        container: "stip",
    },
    SectionSpec {
        key: "relationships",
        heading: "Relationships",
        placeholder: "[To be completed: Relationships to other elements]",
        container: "guid",
    },
    SectionSpec {
        key: "stipulations",
        heading: "Stipulations",
        placeholder: "[To be completed: Special considerations and usage notes]",
        container: "guid",
    },
];

/// Section layout for Syntax Encoding Scheme documentation.
pub const SES_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        key: "definition",
        heading: "Definition",
        placeholder: "[To be completed: Definition of this Syntax Encoding Scheme]",
        container: "guid",
    },
    SectionSpec {
        key: "required_elements",
        heading: "Required Elements",
        placeholder: "[To be completed: List of required elements or components]",
        container: "guid",
    },
    SectionSpec {
        key: "punctuation_rules",
        heading: "Punctuation Rules",
        placeholder: "[To be completed: Specific punctuation and formatting rules]",
        container: "guid",
    },
    SectionSpec {
        key: "isbd_relationship",
        heading: "Relationship to ISBD Standards",
        placeholder: "[To be completed: How this SES supports ISBD standards]",
        container: "guid",
    },
    SectionSpec {
        key: "ses_relationships",
        heading: "Relationship to Other SES",
        placeholder: "[To be completed: Relationships to other Syntax Encoding Schemes]",
        container: "guid",
    },
    SectionSpec {
        key: "examples",
        heading: "Examples",
        placeholder: "[To be completed: Examples of proper SES usage]",
        container: "stip",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_preserve_insertion_order() {
        let mut extra = ExtraFields::new();
        extra.insert("rdfs:domain", "isbd:C2001");
        extra.insert("rdf:type", "rdf:Property");
        extra.insert("skos:scopeNote@en", "Scope note text");

        let keys: Vec<&str> = extra.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["rdfs:domain", "rdf:type", "skos:scopeNote@en"]);
    }

    #[test]
    fn extra_fields_replace_keeps_position() {
        let mut extra = ExtraFields::new();
        extra.insert("a", "1");
        extra.insert("b", "2");
        extra.insert("a", "updated");

        let entries: Vec<(&str, &str)> = extra
            .iter()
            .map(|(k, v)| (k, v.as_text().unwrap()))
            .collect();
        assert_eq!(entries, vec![("a", "updated"), ("b", "2")]);
    }

    #[test]
    fn field_value_as_text() {
        assert_eq!(FieldValue::Text("x".into()).as_text(), Some("x"));
        assert_eq!(
            FieldValue::List(vec!["first".into(), "second".into()]).as_text(),
            Some("first")
        );
        assert_eq!(FieldValue::List(vec![]).as_text(), None);
    }

    #[test]
    fn descriptor_serialization_roundtrip() {
        let mut descriptor = ElementDescriptor::new(
            "http://iflastandards.info/ns/isbd/elements/P1004",
            "has title proper",
        );
        descriptor
            .extra
            .insert("rdf:type", FieldValue::Text("rdf:Property".into()));

        let json = serde_json::to_string(&descriptor).expect("serialize");
        let parsed: ElementDescriptor = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn profile_parse_and_display() {
        let element: DocProfile = "element".parse().expect("parse element");
        assert_eq!(element, DocProfile::Element);
        assert_eq!(element.to_string(), "element");

        let ses: DocProfile = "ses".parse().expect("parse ses");
        assert_eq!(ses, DocProfile::Ses);

        assert!("mdx".parse::<DocProfile>().is_err());
    }

    #[test]
    fn section_keys_are_unique_per_profile() {
        for profile in [DocProfile::Element, DocProfile::Ses] {
            let mut keys: Vec<&str> = profile.sections().iter().map(|s| s.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), profile.sections().len());
        }
    }
}
