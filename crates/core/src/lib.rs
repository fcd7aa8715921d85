//! # Catalog Core
//!
//! Core business logic for the medical content catalog.
//!
//! This crate owns the read-only catalogs built from parsed content:
//! - [`Catalog`]: id lookup, case-insensitive search, category filtering and counts
//! - [`Library`]: every catalog bundled together, built once at startup
//! - [`validation`]: quality checks the content team runs before publishing
//!
//! **No API concerns**: HTTP/gRPC servers and authentication belong in `api-grpc`, `api-rest`,
//! or `api-shared`. Wire parsing of YAML documents belongs in the `content` crate.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod library;
pub mod specialty;
pub mod topics;
pub mod validation;

pub use catalog::{Catalog, CatalogRecord};
pub use config::CoreConfig;
pub use error::{CatalogError, CatalogResult};
pub use library::{Library, LibrarySummary};
pub use specialty::{EntryRef, RecordRef, Specialty, SpecialtyCatalog};
pub use topics::ResolvedCrossReference;
pub use validation::{has_errors, validate_library, IssueCategory, Severity, ValidationIssue};

// Re-export the content model so downstream crates need only one dependency.
pub use content::{
    ContentError, ContentType, CrossReference, EducationalContent, HematologyCategory,
    HematologyEntry, KeyTerm, LevelContent, NeurologyCategory, NeurologyEntry, Relationship,
    Vocabulary,
};
