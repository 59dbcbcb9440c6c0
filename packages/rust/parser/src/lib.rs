//! Metadata parsing: structured element descriptions in, descriptors out.
//!
//! Three source formats are supported, selected by file extension:
//! - `.csv` — delimited records with a header row
//! - `.xml` / `.rdf` — RDF/XML `rdf:Description` trees
//! - `.ttl` / `.turtle` — Turtle graphs
//!
//! Each front-end normalizes its records into [`ElementDescriptor`]s,
//! preserving source order. Records without a resolvable label are dropped.
//! Malformed input is a fatal parse error; there is no partial recovery.

mod rdfxml;
mod tabular;
mod turtle;

use std::path::Path;

use docsmith_shared::{DocsmithError, ElementDescriptor, Result};
use tracing::{info, instrument};

/// Parse a metadata file into element descriptors, dispatching on extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> Result<Vec<ElementDescriptor>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let elements = match ext.as_str() {
        "csv" => tabular::parse_path(path)?,
        "xml" | "rdf" => rdfxml::parse_path(path)?,
        "ttl" | "turtle" => turtle::parse_path(path)?,
        other => {
            return Err(DocsmithError::validation(format!(
                "unsupported file format: '.{other}' (expected .csv, .xml, .rdf, .ttl, or .turtle)"
            )));
        }
    };

    info!(format = %ext, count = elements.len(), "parsed metadata file");
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from("../../../fixtures/metadata").join(name)
    }

    #[test]
    fn dispatch_rejects_unknown_extension() {
        let err = parse_file(Path::new("elements.docx")).unwrap_err();
        assert!(err.to_string().contains(".docx"));
    }

    #[test]
    fn dispatch_rejects_missing_extension() {
        assert!(parse_file(Path::new("elements")).is_err());
    }

    #[test]
    fn csv_fixture_parses() {
        let elements = parse_file(&fixture("elements.csv")).expect("parse csv fixture");
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].label, "has title proper");
        assert_eq!(
            elements[0].uri,
            "http://iflastandards.info/ns/isbd/elements/P1004"
        );
    }

    #[test]
    fn rdfxml_fixture_parses() {
        let elements = parse_file(&fixture("elements.xml")).expect("parse xml fixture");
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].label, "has title proper");
    }

    #[test]
    fn turtle_fixture_parses() {
        let elements = parse_file(&fixture("elements.ttl")).expect("parse turtle fixture");
        assert_eq!(elements.len(), 2);
        assert!(elements.iter().any(|e| e.label == "has title proper"));
    }
}
