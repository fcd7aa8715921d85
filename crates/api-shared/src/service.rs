//! Library facade shared by the REST and gRPC surfaces.
//!
//! Every method takes request values as plain strings (as they arrive from a URL or a
//! protobuf message), delegates to the [`Library`] and returns protobuf messages.

use crate::convert::topic_to_pb;
use crate::pb;
use catalog_core::{CatalogError, CatalogResult, Library};
use std::sync::Arc;

/// Pure catalog operations - no transport concerns.
#[derive(Clone, Debug)]
pub struct CatalogService {
    library: Arc<Library>,
}

impl CatalogService {
    pub fn new(library: Arc<Library>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// One entry by id.
    pub fn get_entry(&self, specialty: &str, id: &str) -> CatalogResult<pb::Entry> {
        let catalog = self.library.specialty_named(specialty)?;
        Ok(catalog.require(id)?.into())
    }

    /// Entries filtered by an optional category, then an optional search query.
    pub fn list_entries(
        &self,
        specialty: &str,
        category: Option<&str>,
        query: Option<&str>,
    ) -> CatalogResult<pb::EntryList> {
        let catalog = self.library.specialty_named(specialty)?;
        let entries = catalog.filter(category, query)?;
        Ok(pb::EntryList {
            entries: entries.into_iter().map(Into::into).collect(),
        })
    }

    pub fn count_entries(&self, specialty: &str) -> CatalogResult<pb::CountRes> {
        let catalog = self.library.specialty_named(specialty)?;
        Ok(pb::CountRes {
            count: catalog.count() as u64,
        })
    }

    pub fn get_topic(&self, id: &str) -> CatalogResult<pb::Topic> {
        let topic = self.library.topics().require(id)?;
        let cross_references = self.library.resolve_cross_references(id)?;
        Ok(topic_to_pb(topic, cross_references))
    }

    /// Topics filtered by an optional content type, then an optional search query.
    pub fn list_topics(
        &self,
        content_type: Option<&str>,
        query: Option<&str>,
    ) -> CatalogResult<pb::TopicList> {
        let topics = self.library.topics().filter(content_type, query)?;
        let topics = topics
            .into_iter()
            .map(|topic| {
                let cross_references = self.library.resolve_cross_references(topic.id.as_str())?;
                Ok(topic_to_pb(topic, cross_references))
            })
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(pb::TopicList { topics })
    }

    pub fn count_topics(&self) -> pb::CountRes {
        pb::CountRes {
            count: self.library.topics().count() as u64,
        }
    }

    pub fn topic_level(&self, id: &str, level: u32) -> CatalogResult<pb::Level> {
        // Anything above u8 is out of range anyway; report it as the largest u8.
        let level = u8::try_from(level).unwrap_or(u8::MAX);
        Ok(self.library.level(id, level)?.into())
    }

    pub fn cross_references(&self, id: &str) -> CatalogResult<pb::CrossReferenceList> {
        let resolved = self.library.resolve_cross_references(id)?;
        Ok(pb::CrossReferenceList {
            cross_references: resolved.into_iter().map(Into::into).collect(),
        })
    }
}

/// Map a catalog error onto a gRPC status.
///
/// Caller mistakes keep their message; anything else is logged and reported as `internal`.
pub fn status_from_error(err: CatalogError) -> tonic::Status {
    match err {
        CatalogError::NotFound { .. } => tonic::Status::not_found(err.to_string()),
        CatalogError::InvalidCategory { .. }
        | CatalogError::InvalidSpecialty(_)
        | CatalogError::InvalidLevel(_)
        | CatalogError::InvalidInput(_) => tonic::Status::invalid_argument(err.to_string()),
        other => {
            tracing::error!("catalog error: {other}");
            tonic::Status::internal("internal error")
        }
    }
}
