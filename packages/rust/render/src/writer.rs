//! Document writer: front matter + templated body → one MDX file.
//!
//! The output path is derived from the element's category folder and an
//! identifier taken from its URI (or a label slug when the URI gives
//! nothing). Writes are unconditional overwrites: a run is an idempotent
//! full regeneration, and manual edits to generated files are not
//! preserved.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use docsmith_shared::{
    DocProfile, DocsmithError, ElementDescriptor, FieldValue, Result, SectionMap,
};

use crate::frontmatter::FrontMatter;

/// Output file extension.
const EXTENSION: &str = "mdx";

/// Keys consumed during parsing, never passed through to front matter.
const SKIP_KEYS: &[&str] = &["uri", "label", "prefLabel", "definition", "comment"];

/// Runs of non-alphanumerics, collapsed to one separator in slugs.
static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug regex"));

/// Language/index suffixes stripped from pass-through keys.
static KEY_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@en|\[\d+\]").expect("key suffix regex"));

// ---------------------------------------------------------------------------
// Identity derivation
// ---------------------------------------------------------------------------

/// Derive the output identifier for an element.
///
/// The final path segment of the URI (e.g. `P1001` from
/// `http://iflastandards.info/ns/isbd/elements/P1001`); when that segment
/// is empty, a slug of the label: lower-cased, runs of non-alphanumerics
/// collapsed to `-`, trimmed of leading/trailing separators.
pub fn derive_element_id(uri: &str, label: &str) -> String {
    let segment = uri.rsplit('/').next().unwrap_or("");
    if !segment.is_empty() {
        return segment.to_string();
    }
    let lowered = label.to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Compute the output path for an element.
///
/// `<out_root>/<folder>/<id>.mdx`, where `folder` is the classified area
/// for element documentation and the fixed `SES` folder for SES
/// documentation.
pub fn document_path(
    out_root: &Path,
    profile: DocProfile,
    area_folder: &str,
    element_id: &str,
) -> PathBuf {
    let folder = match profile {
        DocProfile::Element => area_folder,
        DocProfile::Ses => "SES",
    };
    out_root
        .join(folder)
        .join(format!("{element_id}.{EXTENSION}"))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Render and write one element's document. Returns the path written.
#[instrument(skip_all, fields(label = %descriptor.label))]
pub fn write_document(
    out_root: &Path,
    profile: DocProfile,
    descriptor: &ElementDescriptor,
    area_folder: &str,
    sections: &SectionMap,
) -> Result<PathBuf> {
    let element_id = derive_element_id(&descriptor.uri, &descriptor.label);
    let path = document_path(out_root, profile, area_folder, &element_id);

    let front_matter = match profile {
        DocProfile::Element => element_front_matter(descriptor, &element_id, area_folder),
        DocProfile::Ses => ses_front_matter(descriptor, &element_id),
    };

    let mut content = front_matter.render();
    content.push('\n');
    content.push_str(&render_body(profile, descriptor, sections));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DocsmithError::io(parent, e))?;
    }
    std::fs::write(&path, &content).map_err(|e| DocsmithError::io(&path, e))?;

    info!(path = %path.display(), bytes = content.len(), "saved document");
    Ok(path)
}

/// Front matter for per-element documentation.
fn element_front_matter(
    descriptor: &ElementDescriptor,
    element_id: &str,
    area_folder: &str,
) -> FrontMatter {
    let mut fm = FrontMatter::new();
    fm.field("id", element_id)
        .field("title", descriptor.label.as_str())
        .field(
            "description",
            format!("ISBD element documentation for {}", descriptor.label),
        )
        .field("uri", descriptor.uri.as_str())
        .field("area", area_folder);

    // Well-known RDF annotations, projected into a nested block.
    let mut rdf: Vec<(String, FieldValue)> = Vec::new();
    let mut rdf_field = |name: &str, keys: &[&str]| {
        for key in keys {
            if let Some(value) = descriptor.extra.get(key).filter(|v| !v.is_empty()) {
                rdf.push((name.to_string(), value.clone()));
                return;
            }
        }
    };
    rdf_field(
        "definition",
        &["skos:definition@en[0]", "skos:definition@en"],
    );
    rdf_field("domain", &["rdfs:domain"]);
    rdf_field("range", &["rdfs:range"]);
    rdf_field("type", &["rdf:type"]);
    rdf_field("scopeNote", &["skos:scopeNote@en[0]", "skos:scopeNote@en"]);
    rdf_field("inverseOf", &["owl:inverseOf"]);
    rdf_field("elementSubType", &["rdfs:subPropertyOf"]);
    rdf_field("elementSuperType", &["reg:hasSubproperty"]);
    if !rdf.is_empty() {
        fm.block("RDF", rdf);
    }

    // Pass through everything else, with language/index suffixes cleaned.
    for (key, value) in descriptor.extra.iter() {
        if SKIP_KEYS.contains(&key) || value.is_empty() {
            continue;
        }
        let clean_key = KEY_SUFFIX_RE.replace_all(key, "").into_owned();
        if clean_key.is_empty() || fm.contains_key(&clean_key) {
            debug!(key, "extra field already consumed, skipping pass-through");
            continue;
        }
        fm.field(&clean_key, value.clone());
    }

    fm
}

/// Front matter for SES documentation, with the site's navigation fields.
fn ses_front_matter(descriptor: &ElementDescriptor, element_id: &str) -> FrontMatter {
    let sidebar_label = descriptor
        .extra
        .text("rdfs:label@en")
        .unwrap_or(&descriptor.label)
        .to_string();

    let rdf_text = |keys: &[&str]| -> FieldValue {
        keys.iter()
            .find_map(|key| descriptor.extra.text(key))
            .unwrap_or("")
            .into()
    };

    let mut fm = FrontMatter::new();
    fm.comment("Navigation")
        .raw("slug", &format!("/SES/{element_id}"))
        .field("sidebar_class_name", "sidebar-level-1")
        .field("sidebar_label", sidebar_label)
        .raw("sidebar_level", "1")
        .raw("sidebar_position", "1")
        .field("sidebar_category", "SES")
        .blank()
        .comment("Element identification")
        .field("id", element_id)
        .field("title", descriptor.label.as_str())
        .blank()
        .comment("RDF metadata")
        .block(
            "RDF",
            vec![
                (
                    "definition".into(),
                    rdf_text(&["skos:definition@en[0]", "skos:definition@en"]),
                ),
                ("type".into(), rdf_text(&["rdf:type"])),
                (
                    "scopeNote".into(),
                    rdf_text(&["skos:scopeNote@en[0]", "skos:scopeNote@en"]),
                ),
            ],
        )
        .blank()
        .comment("Deprecation tracking")
        .raw("deprecated", "null")
        .raw("deprecatedInVersion", "null")
        .raw("willBeRemovedInVersion", "null");

    fm
}

/// Render the templated body: title, the profile's sections (populated or
/// placeholder), and the generated-content footer.
fn render_body(
    profile: DocProfile,
    descriptor: &ElementDescriptor,
    sections: &SectionMap,
) -> String {
    let mut body = String::new();

    match profile {
        DocProfile::Element => {
            body.push_str("# ");
            body.push_str(&descriptor.label);
            body.push('\n');
        }
        DocProfile::Ses => {
            // The site interpolates the title from front matter.
            body.push_str("# {frontMatter.title}\n\n");
            body.push_str("## Element Reference\n");
            body.push_str("<ElementReference frontMatter={frontMatter} />\n");
        }
    }

    for spec in profile.sections() {
        body.push('\n');
        body.push_str("## ");
        body.push_str(spec.heading);
        body.push_str("\n\n");
        body.push_str("<div className=\"");
        body.push_str(spec.container);
        body.push_str("\">\n");
        body.push_str(sections.get(spec.key).unwrap_or(spec.placeholder));
        body.push_str("\n</div>\n");
    }

    body.push_str("\n<hr />\n\n");
    body.push_str(
        "*This content was automatically generated from the ISBD documentation using AI analysis.*\n",
    );

    body
}
