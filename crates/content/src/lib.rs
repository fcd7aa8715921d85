//! Content wire/boundary support.
//!
//! This crate provides **wire models** and **translation helpers** for the YAML documents the
//! content team authors:
//! - specialty entry lists (hematology, neurology)
//! - multi-level educational topics
//!
//! This crate focuses on:
//! - strict deserialisation (unknown keys and unknown vocabulary values are rejected)
//! - translation between wire structs and domain-level records
//!
//! Lookup, search and validation of the loaded records live in `catalog-core`.

pub mod hematology;
pub mod neurology;
pub mod topic;

// Re-export facades
pub use hematology::HematologyDocument;
pub use neurology::NeurologyDocument;
pub use topic::TopicDocument;

// Re-export public domain-level types
pub use hematology::{HematologyCategory, HematologyEntry};
pub use neurology::{NeurologyCategory, NeurologyEntry};
pub use topic::{
    Citation, ClinicalRelevance, ContentStatus, ContentTags, ContentType, CrossReference,
    EducationalContent, ExamRelevance, KeyTerm, LevelContent, MediaItem, Relationship,
};

pub use catalog_types::{EntryId, NonEmptyText, TextError};

/// Errors returned by the `content` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`ContentError`].
pub type ContentResult<T> = Result<T, ContentError>;

/// A closed set of values written as kebab-case strings in content documents.
///
/// Every category, relationship and status enum in this crate implements this trait so
/// callers at string boundaries (HTTP query strings, CLI arguments) can parse and print
/// values without a second copy of the mapping.
pub trait Vocabulary: Copy + Eq + std::hash::Hash + std::fmt::Debug + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The wire spelling of this member.
    fn as_str(self) -> &'static str;

    /// Parse the wire spelling of a member. Matching is exact.
    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == value)
    }
}

/// Deserialise a YAML document into a wire struct, reporting the failing field path.
///
/// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
/// `entries[3].category`) to the failing field when the YAML does not match the wire schema.
fn parse_wire<T>(yaml_text: &str, what: &str) -> ContentResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize::<_, T>(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(ContentError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}

/// Parse a record id, naming the offending position on failure.
fn parse_id(raw: &str, position: &str) -> ContentResult<EntryId> {
    EntryId::parse(raw)
        .map_err(|e| ContentError::InvalidInput(format!("{position}.id: {e}")))
}

/// Parse a display name, naming the offending position on failure.
fn parse_name(raw: &str, position: &str) -> ContentResult<NonEmptyText> {
    NonEmptyText::new(raw)
        .map_err(|e| ContentError::InvalidInput(format!("{position}.name: {e}")))
}

/// Check the `specialty` header of an entry document.
fn expect_specialty(found: &str, expected: &str) -> ContentResult<()> {
    if found != expected {
        return Err(ContentError::InvalidInput(format!(
            "Expected specialty '{expected}', got '{found}'"
        )));
    }
    Ok(())
}
