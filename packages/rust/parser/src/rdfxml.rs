//! RDF/XML front-end.
//!
//! Scans for `rdf:Description` elements carrying an `rdf:about` attribute
//! and projects four fields from their children. Field detection is a
//! *substring* match on the child tag name, kept deliberately from the
//! original tooling this replaces: any tag containing `label` is treated as
//! the label field (case-sensitive, so `skos:prefLabel` does not collide).
//! Tightening this to exact tag matching could silently drop data the
//! original captured; see DESIGN.md.

use std::path::Path;

use docsmith_shared::{DocsmithError, ElementDescriptor, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

/// Fields collected from one `rdf:Description` element.
#[derive(Debug, Default)]
struct DescriptionFields {
    about: String,
    label: String,
    pref_label: String,
    definition: String,
    comment: String,
}

impl DescriptionFields {
    fn into_descriptor(self) -> ElementDescriptor {
        let mut descriptor = ElementDescriptor::new(self.about, self.label);
        if !self.pref_label.is_empty() {
            descriptor.extra.insert("prefLabel", self.pref_label);
        }
        if !self.definition.is_empty() {
            descriptor.extra.insert("definition", self.definition);
        }
        if !self.comment.is_empty() {
            descriptor.extra.insert("comment", self.comment);
        }
        descriptor
    }
}

pub(crate) fn parse_path(path: &Path) -> Result<Vec<ElementDescriptor>> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;
    parse_str(&content)
}

pub(crate) fn parse_str(xml: &str) -> Result<Vec<ElementDescriptor>> {
    let mut reader = Reader::from_str(xml);

    let mut elements = Vec::new();
    let mut current: Option<DescriptionFields> = None;
    let mut current_tag: Option<String> = None;

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(DocsmithError::parse(format!(
                    "RDF/XML error at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                if current.is_none() {
                    if start.name().local_name().as_ref() != b"Description" {
                        continue;
                    }
                    let mut fields = DescriptionFields::default();
                    for attr in start.attributes() {
                        let attr = attr.map_err(|e| {
                            DocsmithError::parse(format!("RDF/XML attribute error: {e}"))
                        })?;
                        if attr.key.as_ref() == b"rdf:about" {
                            fields.about = attr
                                .unescape_value()
                                .map_err(|e| {
                                    DocsmithError::parse(format!("RDF/XML attribute error: {e}"))
                                })?
                                .into_owned();
                        }
                    }
                    current = Some(fields);
                } else {
                    current_tag =
                        Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                }
            }
            Ok(Event::End(end)) => {
                if end.name().local_name().as_ref() == b"Description" {
                    if let Some(fields) = current.take() {
                        if fields.label.is_empty() {
                            debug!(uri = %fields.about, "description without label, skipping");
                        } else {
                            elements.push(fields.into_descriptor());
                        }
                    }
                }
                current_tag = None;
            }
            Ok(Event::Text(text)) => {
                let (Some(fields), Some(tag)) = (current.as_mut(), current_tag.as_deref())
                else {
                    continue;
                };
                let value = text
                    .unescape()
                    .map_err(|e| DocsmithError::parse(format!("RDF/XML text error: {e}")))?;
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                // Substring heuristic, original check order. `label` is
                // tested first and case-sensitively, so `rdfs:label`
                // lands here while `skos:prefLabel` falls through.
                if tag.contains("label") {
                    fields.label = value.to_string();
                } else if tag.contains("prefLabel") {
                    fields.pref_label = value.to_string();
                } else if tag.contains("definition") {
                    fields.definition = value.to_string();
                } else if tag.contains("comment") {
                    fields.comment = value.to_string();
                }
            }
            Ok(_) => {}
        }
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#">
  <rdf:Description rdf:about="http://iflastandards.info/ns/isbd/elements/P1004">
    <rdfs:label>has title proper</rdfs:label>
    <skos:prefLabel>title proper</skos:prefLabel>
    <skos:definition>The chief name of a resource.</skos:definition>
    <rdfs:comment>Area 1 element.</rdfs:comment>
  </rdf:Description>
  <rdf:Description rdf:about="http://iflastandards.info/ns/isbd/elements/P1016">
    <rdfs:label>has edition statement</rdfs:label>
  </rdf:Description>
</rdf:RDF>
"#;

    #[test]
    fn descriptions_become_descriptors() {
        let elements = parse_str(SAMPLE).unwrap();
        assert_eq!(elements.len(), 2);

        let first = &elements[0];
        assert_eq!(
            first.uri,
            "http://iflastandards.info/ns/isbd/elements/P1004"
        );
        assert_eq!(first.label, "has title proper");
        assert_eq!(first.extra.text("prefLabel"), Some("title proper"));
        assert_eq!(
            first.extra.text("definition"),
            Some("The chief name of a resource.")
        );
        assert_eq!(first.extra.text("comment"), Some("Area 1 element."));
    }

    #[test]
    fn substring_match_accepts_any_label_bearing_tag() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:x="http://example.org/ns#">
          <rdf:Description rdf:about="http://example.org/E1">
            <x:customlabel>from custom tag</x:customlabel>
          </rdf:Description>
        </rdf:RDF>"#;
        let elements = parse_str(xml).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].label, "from custom tag");
    }

    #[test]
    fn unlabeled_descriptions_are_dropped() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:skos="http://www.w3.org/2004/02/skos/core#">
          <rdf:Description rdf:about="http://example.org/E1">
            <skos:definition>definition only, no label</skos:definition>
          </rdf:Description>
        </rdf:RDF>"#;
        let elements = parse_str(xml).unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn malformed_xml_fails_fast() {
        let err = parse_str("<rdf:RDF><rdf:Description></wrong></rdf:RDF>").unwrap_err();
        assert!(err.to_string().contains("RDF/XML error"));
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#">
          <rdf:Description rdf:about="http://example.org/E1">
            <rdfs:label>title &amp; statement</rdfs:label>
          </rdf:Description>
        </rdf:RDF>"#;
        let elements = parse_str(xml).unwrap();
        assert_eq!(elements[0].label, "title & statement");
    }
}
