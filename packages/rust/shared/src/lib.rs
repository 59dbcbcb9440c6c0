//! Shared types, error model, and configuration for Docsmith.
//!
//! This crate is the foundation depended on by all other Docsmith crates.
//! It provides:
//! - [`DocsmithError`] — the unified error type
//! - Domain types ([`ElementDescriptor`], [`FieldValue`], [`SectionMap`], [`DocProfile`])
//! - Configuration ([`AppConfig`], config loading, credential resolution)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GenAiSettings, config_dir, config_file_path, init_config,
    load_config, load_config_from, resolve_api_key,
};
pub use error::{DocsmithError, Result};
pub use types::{
    DocProfile, ELEMENT_SECTIONS, ElementDescriptor, ExtraFields, FieldValue, SES_SECTIONS,
    SectionMap, SectionSpec,
};
