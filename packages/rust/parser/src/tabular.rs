//! CSV front-end.
//!
//! Each row becomes one descriptor. The label is resolved by probing a fixed
//! priority list of candidate columns; rows where every candidate is empty
//! produce no descriptor. All other columns pass through into `extra` in
//! header order, empty cells omitted.

use std::io::Read;
use std::path::Path;

use docsmith_shared::{DocsmithError, ElementDescriptor, Result};
use tracing::debug;

/// Label candidate columns, highest priority first.
const LABEL_COLUMNS: &[&str] = &[
    "rdfs:label@en",
    "dc:title@en",
    "skos:prefLabel@en",
    "reg:name@en",
    "label",
];

pub(crate) fn parse_path(path: &Path) -> Result<Vec<ElementDescriptor>> {
    let file = std::fs::File::open(path).map_err(|e| DocsmithError::io(path, e))?;
    parse_reader(file)
}

pub(crate) fn parse_reader<R: Read>(reader: R) -> Result<Vec<ElementDescriptor>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DocsmithError::parse(format!("invalid CSV header: {e}")))?
        .clone();

    let mut elements = Vec::new();

    for (idx, record) in csv_reader.records().enumerate() {
        // Header is line 1, data starts at line 2.
        let line = idx + 2;
        let record =
            record.map_err(|e| DocsmithError::parse(format!("CSV line {line}: {e}")))?;

        let field = |name: &str| -> &str {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| record.get(i))
                .unwrap_or("")
        };

        let label = LABEL_COLUMNS
            .iter()
            .map(|column| field(column))
            .find(|value| !value.is_empty())
            .unwrap_or("");

        if label.is_empty() {
            debug!(line, "row without label, skipping");
            continue;
        }

        let uri = match field("uri") {
            "" => field("URI"),
            value => value,
        };

        let mut descriptor = ElementDescriptor::new(uri, label);
        for (header, value) in headers.iter().zip(record.iter()) {
            if value.is_empty() || header == "uri" || header == "URI" {
                continue;
            }
            descriptor.extra.insert(header, value);
        }

        elements.push(descriptor);
    }

    Ok(elements)
}
