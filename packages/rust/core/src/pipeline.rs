//! End-to-end generation pipeline: descriptors → prompts → generated prose
//! → sectioned MDX documents.
//!
//! The batch is strictly sequential: one element is fully processed before
//! the next starts, with a fixed courtesy delay in between. A failure while
//! processing one element is logged and recorded, never fatal; the
//! reference upload failing is fatal for the whole run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use docsmith_genai::{Generator, ReferenceHandle};
use docsmith_render::{sectionize, write_document};
use docsmith_shared::{DocProfile, ElementDescriptor, Result};

use crate::area;
use crate::prompt::build_prompt;

// ---------------------------------------------------------------------------
// Run configuration & stats
// ---------------------------------------------------------------------------

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory for generated documents.
    pub out_root: PathBuf,
    /// Documentation profile to produce.
    pub profile: DocProfile,
    /// Fixed delay between elements (external rate-limit courtesy).
    pub element_delay: Duration,
}

/// Summary of a completed generation run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Elements handed to the driver after profile filtering.
    pub attempted: usize,
    /// Documents successfully written.
    pub generated: usize,
    /// Elements skipped for a missing label.
    pub skipped: usize,
    /// Elements that failed mid-processing (label, error message).
    pub errors: Vec<(String, String)>,
    /// Token usage across all generation calls.
    pub tokens_in: u64,
    pub tokens_out: u64,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl RunStats {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each element is processed.
    fn element(&self, current: usize, total: usize, label: &str);
    /// Called when the run completes.
    fn done(&self, stats: &RunStats);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn element(&self, _current: usize, _total: usize, _label: &str) {}
    fn done(&self, _stats: &RunStats) {}
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run the full generation pipeline.
///
/// 1. Upload the reference document and wait until it is ready
/// 2. Filter elements for the profile
/// 3. Per element: prompt → generate → sectionize → classify → write
#[instrument(skip_all, fields(profile = %config.profile, elements = elements.len()))]
pub async fn run(
    config: &RunConfig,
    elements: Vec<ElementDescriptor>,
    reference_path: &Path,
    generator: &dyn Generator,
    progress: &dyn ProgressReporter,
) -> Result<RunStats> {
    let start = Instant::now();
    let mut stats = RunStats::default();

    // --- Phase 1: Reference upload ---
    progress.phase("Uploading reference document");
    let handle = generator.upload_reference(reference_path).await?;

    // --- Phase 2: Profile filter ---
    let elements = filter_for_profile(config.profile, elements);
    stats.attempted = elements.len();
    let total = elements.len();

    info!(
        profile = %config.profile,
        count = total,
        out_root = %config.out_root.display(),
        "starting generation batch"
    );

    // --- Phase 3: Sequential generation ---
    progress.phase("Generating documentation");
    for (index, element) in elements.iter().enumerate() {
        progress.element(index + 1, total, &element.label);

        if element.label.is_empty() {
            debug!(uri = %element.uri, "element without label, skipping");
            stats.skipped += 1;
            continue;
        }

        info!(
            current = index + 1,
            total,
            label = %element.label,
            "processing element"
        );

        match process_element(config, element, &handle, generator).await {
            Ok((path, tokens_in, tokens_out)) => {
                stats.generated += 1;
                stats.tokens_in += tokens_in;
                stats.tokens_out += tokens_out;
                debug!(path = %path.display(), "element complete");
            }
            Err(e) => {
                warn!(label = %element.label, error = %e, "failed to process element, continuing");
                stats.errors.push((element.label.clone(), e.to_string()));
            }
        }

        // Courtesy delay toward the external service, skipped after the
        // last element.
        if index + 1 < total && !config.element_delay.is_zero() {
            tokio::time::sleep(config.element_delay).await;
        }
    }

    stats.elapsed = start.elapsed();
    progress.done(&stats);

    info!(
        generated = stats.generated,
        skipped = stats.skipped,
        failed = stats.failed(),
        tokens_in = stats.tokens_in,
        tokens_out = stats.tokens_out,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "generation batch complete"
    );

    Ok(stats)
}

/// Process one element: prompt → generate → sectionize → classify → write.
async fn process_element(
    config: &RunConfig,
    element: &ElementDescriptor,
    handle: &ReferenceHandle,
    generator: &dyn Generator,
) -> Result<(PathBuf, u64, u64)> {
    let prompt = build_prompt(config.profile, element);
    let generated = generator.generate(handle, &prompt).await?;
    let sections = sectionize(&generated.text, config.profile.sections());
    let area = area::classify(&element.label);
    let path = write_document(
        &config.out_root,
        config.profile,
        element,
        area.folder(),
        &sections,
    )?;
    Ok((path, generated.tokens_in, generated.tokens_out))
}

/// Restrict the element set to what the profile documents.
///
/// SES documentation covers only class records (`rdf:type` of `owl:Class`);
/// element documentation takes everything.
pub fn filter_for_profile(
    profile: DocProfile,
    elements: Vec<ElementDescriptor>,
) -> Vec<ElementDescriptor> {
    match profile {
        DocProfile::Element => elements,
        DocProfile::Ses => {
            let before = elements.len();
            let filtered: Vec<ElementDescriptor> = elements
                .into_iter()
                .filter(|e| e.extra.text("rdf:type") == Some("owl:Class"))
                .collect();
            info!(
                kept = filtered.len(),
                dropped = before - filtered.len(),
                "filtered records to owl:Class for SES profile"
            );
            filtered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use docsmith_genai::GeneratedText;
    use docsmith_shared::DocsmithError;

    /// Fake generation service: canned text, optional failures per label.
    struct FakeGenerator {
        response: String,
        fail_labels: Vec<String>,
    }

    impl FakeGenerator {
        fn with_response(response: &str) -> Self {
            Self {
                response: response.to_string(),
                fail_labels: Vec::new(),
            }
        }
    }

    #[async_trait::async_trait]
    impl Generator for FakeGenerator {
        async fn upload_reference(
            &self,
            _path: &Path,
        ) -> docsmith_shared::Result<ReferenceHandle> {
            Ok(ReferenceHandle {
                name: "files/fake".into(),
                uri: "https://svc.example/v1beta/files/fake".into(),
                mime_type: "application/pdf".into(),
            })
        }

        async fn generate(
            &self,
            _handle: &ReferenceHandle,
            prompt: &str,
        ) -> docsmith_shared::Result<GeneratedText> {
            for label in &self.fail_labels {
                if prompt.contains(label.as_str()) {
                    return Err(DocsmithError::Service("synthetic failure".into()));
                }
            }
            Ok(GeneratedText {
                text: self.response.clone(),
                tokens_in: 10,
                tokens_out: 5,
            })
        }
    }

    fn config(out_root: &Path) -> RunConfig {
        RunConfig {
            out_root: out_root.to_path_buf(),
            profile: DocProfile::Element,
            element_delay: Duration::ZERO,
        }
    }

    const RESPONSE: &str = "\
## Element Reference
The official definition.

## Examples
```
Example record
```
";

    #[tokio::test]
    async fn unlabeled_elements_are_skipped_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let elements = vec![
            ElementDescriptor::new("http://example.org/elements/E042", "has title proper"),
            ElementDescriptor::new("http://example.org/elements/E043", ""),
        ];
        let generator = FakeGenerator::with_response(RESPONSE);

        let stats = run(
            &config(tmp.path()),
            elements,
            Path::new("reference.pdf"),
            &generator,
            &SilentProgress,
        )
        .await
        .expect("run");

        assert_eq!(stats.generated, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed(), 0);

        // Exactly one document, named from the first element's URI segment.
        assert!(tmp.path().join("area1/E042.mdx").exists());
        let written: Vec<_> = walk_files(tmp.path());
        assert_eq!(written.len(), 1);
    }

    #[tokio::test]
    async fn per_element_failure_does_not_abort_the_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let elements = vec![
            ElementDescriptor::new("http://example.org/elements/E1", "has edition statement"),
            ElementDescriptor::new("http://example.org/elements/E2", "has extent"),
        ];
        let mut generator = FakeGenerator::with_response(RESPONSE);
        generator.fail_labels.push("has edition statement".into());

        let stats = run(
            &config(tmp.path()),
            elements,
            Path::new("reference.pdf"),
            &generator,
            &SilentProgress,
        )
        .await
        .expect("run");

        assert_eq!(stats.generated, 1);
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.errors[0].0, "has edition statement");
        assert!(tmp.path().join("area5/E2.mdx").exists());
        assert!(!tmp.path().join("area2/E1.mdx").exists());
    }

    #[tokio::test]
    async fn token_usage_is_accumulated() {
        let tmp = tempfile::tempdir().unwrap();
        let elements = vec![
            ElementDescriptor::new("http://example.org/elements/E1", "has extent"),
            ElementDescriptor::new("http://example.org/elements/E2", "has note on title"),
        ];
        let generator = FakeGenerator::with_response(RESPONSE);

        let stats = run(
            &config(tmp.path()),
            elements,
            Path::new("reference.pdf"),
            &generator,
            &SilentProgress,
        )
        .await
        .expect("run");

        assert_eq!(stats.tokens_in, 20);
        assert_eq!(stats.tokens_out, 10);
    }

    #[tokio::test]
    async fn ses_profile_filters_to_owl_class() {
        let tmp = tempfile::tempdir().unwrap();
        let mut class_record = ElementDescriptor::new(
            "http://example.org/unc/elements/C2023",
            "has compound title SES",
        );
        class_record.extra.insert("rdf:type", "owl:Class");
        let mut property_record =
            ElementDescriptor::new("http://example.org/elements/P1004", "has title proper");
        property_record.extra.insert("rdf:type", "rdf:Property");

        let mut config = config(tmp.path());
        config.profile = DocProfile::Ses;
        let generator = FakeGenerator::with_response("## Definition\nA scheme.\n");

        let stats = run(
            &config,
            vec![class_record, property_record],
            Path::new("reference.pdf"),
            &generator,
            &SilentProgress,
        )
        .await
        .expect("run");

        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.generated, 1);
        assert!(tmp.path().join("SES/C2023.mdx").exists());
    }

    fn walk_files(root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let mut dirs = vec![root.to_path_buf()];
        while let Some(dir) = dirs.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    dirs.push(path);
                } else {
                    files.push(path);
                }
            }
        }
        files
    }
}
