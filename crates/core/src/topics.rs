//! Educational topic lookups that go beyond plain catalog access.

use crate::catalog::CatalogRecord;
use crate::specialty::RecordRef;
use crate::{CatalogError, CatalogResult, Library};
use content::{ContentType, CrossReference, EducationalContent, LevelContent, Vocabulary};
use serde::Serialize;

impl CatalogRecord for EducationalContent {
    type Category = ContentType;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn category(&self) -> ContentType {
        self.content_type
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.content_type.as_str()];
        fields.extend(self.localized_name.as_deref());
        fields.extend(self.alternate_names.iter().map(String::as_str));
        fields.extend(self.levels.iter().map(|l| l.summary.as_str()));
        fields.extend(self.tags.keywords.iter().map(String::as_str));
        fields
    }
}

/// A cross-reference paired with the record it names, when that record is loaded.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ResolvedCrossReference<'a> {
    #[serde(flatten)]
    pub reference: &'a CrossReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<RecordRef<'a>>,
}

impl ResolvedCrossReference<'_> {
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

impl Library {
    /// Level `n` of topic `id`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidLevel`] if `n` is outside `1..=5`
    /// - [`CatalogError::NotFound`] if no topic has this id
    /// - [`CatalogError::NotFound`] naming `{id}/levels/{n}` if the topic lacks that level
    pub fn level(&self, id: &str, n: u8) -> CatalogResult<&LevelContent> {
        if !(EducationalContent::MIN_LEVEL..=EducationalContent::MAX_LEVEL).contains(&n) {
            return Err(CatalogError::InvalidLevel(n));
        }

        let topic = self.topics().require(id)?;
        topic.level(n).ok_or_else(|| CatalogError::NotFound {
            catalog: self.topics().name(),
            id: format!("{id}/levels/{n}"),
        })
    }

    /// Pair each cross-reference of topic `id` with its target, looked up by id across every
    /// catalog. Targets that are not loaded stay unresolved.
    pub fn resolve_cross_references(&self, id: &str) -> CatalogResult<Vec<ResolvedCrossReference<'_>>> {
        let topic = self.topics().require(id)?;

        Ok(topic
            .cross_references
            .iter()
            .map(|reference| ResolvedCrossReference {
                reference,
                target: self.find_record(&reference.target_id),
            })
            .collect())
    }
}
