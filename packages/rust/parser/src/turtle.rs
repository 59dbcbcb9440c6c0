//! Turtle front-end.
//!
//! Loads the full graph, then projects four fixed predicates per IRI
//! subject (blank nodes are skipped). Subjects appear in order of first
//! mention in the document; repeated predicate values are last-write-wins,
//! matching the original tooling's per-subject projection.

use std::io::Read;
use std::path::Path;

use docsmith_shared::{DocsmithError, ElementDescriptor, Result};
use oxrdf::{Subject, Term};
use oxttl::TurtleParser;
use tracing::debug;

const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

#[derive(Debug, Default)]
struct SubjectFields {
    label: String,
    pref_label: String,
    definition: String,
    comment: String,
}

pub(crate) fn parse_path(path: &Path) -> Result<Vec<ElementDescriptor>> {
    let file = std::fs::File::open(path).map_err(|e| DocsmithError::io(path, e))?;
    parse_reader(file)
}

pub(crate) fn parse_reader<R: Read>(reader: R) -> Result<Vec<ElementDescriptor>> {
    // Order of first mention in the document.
    let mut order: Vec<String> = Vec::new();
    let mut subjects: Vec<SubjectFields> = Vec::new();

    for triple in TurtleParser::new().for_reader(reader) {
        let triple = triple.map_err(|e| DocsmithError::parse(format!("Turtle error: {e}")))?;

        let Subject::NamedNode(subject) = &triple.subject else {
            continue;
        };
        let uri = subject.as_str();

        let index = match order.iter().position(|s| s == uri) {
            Some(i) => i,
            None => {
                order.push(uri.to_string());
                subjects.push(SubjectFields::default());
                order.len() - 1
            }
        };

        let Term::Literal(literal) = &triple.object else {
            continue;
        };
        let value = literal.value();
        if value.is_empty() {
            continue;
        }

        let fields = &mut subjects[index];
        match triple.predicate.as_str() {
            RDFS_LABEL => fields.label = value.to_string(),
            SKOS_PREF_LABEL => fields.pref_label = value.to_string(),
            SKOS_DEFINITION => fields.definition = value.to_string(),
            RDFS_COMMENT => fields.comment = value.to_string(),
            _ => {}
        }
    }

    let mut elements = Vec::new();
    for (uri, fields) in order.into_iter().zip(subjects) {
        if fields.label.is_empty() {
            debug!(%uri, "subject without rdfs:label, skipping");
            continue;
        }
        let mut descriptor = ElementDescriptor::new(uri, fields.label);
        if !fields.pref_label.is_empty() {
            descriptor.extra.insert("prefLabel", fields.pref_label);
        }
        if !fields.definition.is_empty() {
            descriptor.extra.insert("definition", fields.definition);
        }
        if !fields.comment.is_empty() {
            descriptor.extra.insert("comment", fields.comment);
        }
        elements.push(descriptor);
    }

    Ok(elements)
}
