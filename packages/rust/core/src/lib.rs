//! Pipeline orchestration for Docsmith.
//!
//! Ties the other crates together: classifies elements into ISBD areas,
//! builds generation prompts, and drives the sequential batch that turns
//! parsed descriptors into MDX documents via the generation service.

pub mod area;
pub mod pipeline;
pub mod prompt;

pub use area::{Area, classify};
pub use pipeline::{
    ProgressReporter, RunConfig, RunStats, SilentProgress, filter_for_profile, run,
};
pub use prompt::build_prompt;
