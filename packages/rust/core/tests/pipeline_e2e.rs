//! End-to-end: CSV metadata through the batch driver to files on disk,
//! with the generation service faked out.

use std::path::Path;

use docsmith_core::{RunConfig, SilentProgress, run};
use docsmith_genai::{GeneratedText, Generator, ReferenceHandle};
use docsmith_shared::{DocProfile, Result};

struct FakeGenerator;

#[async_trait::async_trait]
impl Generator for FakeGenerator {
    async fn upload_reference(&self, _path: &Path) -> Result<ReferenceHandle> {
        Ok(ReferenceHandle {
            name: "files/fake".into(),
            uri: "https://svc.example/v1beta/files/fake".into(),
            mime_type: "application/pdf".into(),
        })
    }

    async fn generate(&self, _handle: &ReferenceHandle, _prompt: &str) -> Result<GeneratedText> {
        Ok(GeneratedText {
            text: "## Element Reference\nDefinition from the reference document.\n".into(),
            tokens_in: 1,
            tokens_out: 1,
        })
    }
}

#[tokio::test]
async fn two_row_csv_produces_exactly_one_document() {
    let tmp = tempfile::tempdir().expect("tempdir");

    // First row labeled, second row with every label column empty.
    let data_file = tmp.path().join("elements.csv");
    std::fs::write(
        &data_file,
        "\
uri,rdfs:label@en
http://iflastandards.info/ns/isbd/elements/E042,has title proper
http://iflastandards.info/ns/isbd/elements/E043,
",
    )
    .expect("write csv");

    let elements = docsmith_parser::parse_file(&data_file).expect("parse");
    assert_eq!(elements.len(), 1, "unlabeled row must not produce a descriptor");

    let out_root = tmp.path().join("docs");
    let config = RunConfig {
        out_root: out_root.clone(),
        profile: DocProfile::Element,
        element_delay: std::time::Duration::ZERO,
    };

    let stats = run(
        &config,
        elements,
        Path::new("reference.pdf"),
        &FakeGenerator,
        &SilentProgress,
    )
    .await
    .expect("batch run");

    assert_eq!(stats.generated, 1);
    assert_eq!(stats.failed(), 0);

    // Exactly one output document, named from the first row's URI segment
    // and filed under its classified area.
    let expected = out_root.join("area1/E042.mdx");
    assert!(expected.exists(), "missing {}", expected.display());

    let mut count = 0;
    let mut dirs = vec![out_root.clone()];
    while let Some(dir) = dirs.pop() {
        for entry in std::fs::read_dir(&dir).expect("read_dir") {
            let path = entry.expect("entry").path();
            if path.is_dir() {
                dirs.push(path);
            } else {
                count += 1;
            }
        }
    }
    assert_eq!(count, 1, "exactly one document expected");

    let content = std::fs::read_to_string(&expected).expect("read output");
    assert!(content.contains("Definition from the reference document."));
    assert!(content.contains("id: E042"));
}
