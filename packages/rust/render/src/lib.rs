//! Rendering: generated prose → sectioned, templated MDX documents.
//!
//! Three stages, used together by the batch driver:
//! 1. [`sectionizer::sectionize`] splits raw generated text into named
//!    sections by heading detection.
//! 2. [`frontmatter::FrontMatter`] renders the ordered YAML prologue.
//! 3. [`writer::write_document`] derives the output path and writes the
//!    final file.

pub mod frontmatter;
pub mod sectionizer;
pub mod writer;

pub use frontmatter::{FrontMatter, yaml_quote};
pub use sectionizer::sectionize;
pub use writer::{derive_element_id, document_path, write_document};
