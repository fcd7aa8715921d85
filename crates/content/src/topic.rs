//! Multi-level educational topic wire models.
//!
//! A topic document is a YAML file with a single `topics` list. Each topic carries five
//! graduated explanations (level 1 for patients through level 5 for specialists), plus
//! citations, weak cross-references to other records and tagging metadata.
//!
//! Parsing enforces shape only: level numbers must be in `1..=5` and appear at most once.
//! Completeness (all five levels present, non-empty text, parseable dates) is the concern of
//! the content validator in `catalog-core`.

use crate::{parse_id, parse_name, parse_wire, ContentError, ContentResult, Vocabulary};
use catalog_types::{EntryId, NonEmptyText};
use serde::{Deserialize, Serialize};

// ============================================================================
// Vocabularies
// ============================================================================

/// What kind of thing a topic describes. Acts as the topic's category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Structure,
    System,
    Pathway,
    Process,
    Condition,
    Concept,
    Topic,
}

impl Vocabulary for ContentType {
    const ALL: &'static [Self] = &[
        Self::Structure,
        Self::System,
        Self::Pathway,
        Self::Process,
        Self::Condition,
        Self::Concept,
        Self::Topic,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::System => "system",
            Self::Pathway => "pathway",
            Self::Process => "process",
            Self::Condition => "condition",
            Self::Concept => "concept",
            Self::Topic => "topic",
        }
    }
}

/// How a cross-referenced record relates to the referring topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    Parent,
    Child,
    Sibling,
    Related,
    SeeAlso,
}

impl Vocabulary for Relationship {
    const ALL: &'static [Self] = &[
        Self::Parent,
        Self::Child,
        Self::Sibling,
        Self::Related,
        Self::SeeAlso,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::Related => "related",
            Self::SeeAlso => "see-also",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClinicalRelevance {
    Low,
    Medium,
    High,
    Critical,
}

impl Vocabulary for ClinicalRelevance {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Editorial lifecycle of a topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentStatus {
    Draft,
    Review,
    Published,
}

impl Vocabulary for ContentStatus {
    const ALL: &'static [Self] = &[Self::Draft, Self::Review, Self::Published];

    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Published => "published",
        }
    }
}

// ============================================================================
// Public domain-level types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}

/// One graduated explanation of a topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelContent {
    /// 1 (lay reader) through 5 (specialist).
    pub level: u8,
    pub summary: String,
    pub explanation: String,
    pub key_terms: Vec<KeyTerm>,
    pub analogies: Vec<String>,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    pub patient_counseling_points: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaItem {
    pub id: String,
    pub kind: String,
    pub filename: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A literature reference: either free text or a structured source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citation {
    Reference(String),
    Source {
        id: String,
        kind: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        authors: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chapter: Option<String>,
    },
}

impl Citation {
    /// The text a reader would see: the reference itself, or the source title.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Reference(text) => text,
            Self::Source { title, .. } => title,
        }
    }
}

/// A weak pointer to another record.
///
/// The target is never resolved at load time and may name a record that is not loaded.
/// `target_id` is kept as raw text so the validator can report empty targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossReference {
    pub target_id: String,
    pub target_type: ContentType,
    pub relationship: Relationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExamRelevance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usmle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbme: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shelf: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentTags {
    #[serde(default)]
    pub systems: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_relevance: Option<ClinicalRelevance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_relevance: Option<ExamRelevance>,
}

/// A multi-level educational topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EducationalContent {
    pub id: EntryId,
    pub content_type: ContentType,
    pub name: NonEmptyText,
    pub localized_name: Option<String>,
    pub alternate_names: Vec<String>,
    /// Sorted by level number; each level appears at most once.
    pub levels: Vec<LevelContent>,
    pub media: Vec<MediaItem>,
    pub citations: Vec<Citation>,
    pub cross_references: Vec<CrossReference>,
    pub tags: ContentTags,
    pub created_at: String,
    pub updated_at: String,
    pub version: u32,
    pub status: ContentStatus,
    pub contributors: Vec<String>,
}

impl EducationalContent {
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 5;

    /// Returns the explanation at level `n`, if the topic has one.
    pub fn level(&self, n: u8) -> Option<&LevelContent> {
        self.levels.iter().find(|l| l.level == n)
    }
}

// ============================================================================
// Public TopicDocument operations
// ============================================================================

/// Topic document operations.
pub struct TopicDocument;

impl TopicDocument {
    /// Parse a topic document from YAML text, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Translation`] on schema mismatch and
    /// [`ContentError::InvalidInput`] for an invalid id, a blank name, a level number outside
    /// `1..=5`, or a level number given twice within one topic.
    pub fn parse(yaml_text: &str) -> ContentResult<Vec<EducationalContent>> {
        let wire: TopicDocumentWire = parse_wire(yaml_text, "Topic document")?;

        wire.topics
            .into_iter()
            .enumerate()
            .map(|(i, topic)| wire_to_domain(topic, &format!("topics[{i}]")))
            .collect()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicDocumentWire {
    #[serde(default)]
    topics: Vec<TopicWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicWire {
    id: String,
    content_type: ContentType,
    name: String,
    #[serde(default)]
    localized_name: Option<String>,
    #[serde(default)]
    alternate_names: Vec<String>,
    levels: Vec<LevelWire>,
    #[serde(default)]
    media: Vec<MediaItem>,
    #[serde(default)]
    citations: Vec<Citation>,
    #[serde(default)]
    cross_references: Vec<CrossReference>,
    #[serde(default)]
    tags: ContentTags,
    created_at: String,
    updated_at: String,
    version: u32,
    status: ContentStatus,
    #[serde(default)]
    contributors: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelWire {
    level: u8,
    summary: String,
    explanation: String,
    #[serde(default)]
    key_terms: Vec<KeyTerm>,
    #[serde(default)]
    analogies: Vec<String>,
    #[serde(default)]
    examples: Vec<String>,
    #[serde(default)]
    clinical_notes: Option<String>,
    #[serde(default)]
    patient_counseling_points: Vec<String>,
}

fn wire_to_domain(wire: TopicWire, position: &str) -> ContentResult<EducationalContent> {
    let id = parse_id(&wire.id, position)?;
    let name = parse_name(&wire.name, position)?;

    let mut levels = Vec::with_capacity(wire.levels.len());
    for (i, level) in wire.levels.into_iter().enumerate() {
        let n = level.level;
        if !(EducationalContent::MIN_LEVEL..=EducationalContent::MAX_LEVEL).contains(&n) {
            return Err(ContentError::InvalidInput(format!(
                "{position}.levels[{i}].level: {n} is outside {}..={}",
                EducationalContent::MIN_LEVEL,
                EducationalContent::MAX_LEVEL
            )));
        }
        if levels.iter().any(|l: &LevelContent| l.level == n) {
            return Err(ContentError::InvalidInput(format!(
                "{position}.levels[{i}].level: level {n} appears more than once"
            )));
        }
        levels.push(LevelContent {
            level: n,
            summary: level.summary,
            explanation: level.explanation,
            key_terms: level.key_terms,
            analogies: level.analogies,
            examples: level.examples,
            clinical_notes: level.clinical_notes,
            patient_counseling_points: level.patient_counseling_points,
        });
    }
    levels.sort_by_key(|l| l.level);

    Ok(EducationalContent {
        id,
        content_type: wire.content_type,
        name,
        localized_name: wire.localized_name,
        alternate_names: wire.alternate_names,
        levels,
        media: wire.media,
        citations: wire.citations,
        cross_references: wire.cross_references,
        tags: wire.tags,
        created_at: wire.created_at,
        updated_at: wire.updated_at,
        version: wire.version,
        status: wire.status,
        contributors: wire.contributors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> String {
        r#"topics:
  - id: hematology-iron-deficiency-anemia-comprehensive
    content_type: condition
    name: Iron Deficiency Anemia
    localized_name: Anemia por deficiencia de hierro
    alternate_names: [IDA]
    levels:
      - level: 2
        summary: Most common anemia worldwide.
        explanation: Develops in three progressive stages.
        key_terms:
          - term: Ferritin
            definition: A blood protein that stores iron
      - level: 1
        summary: Not enough iron to make red blood cells.
        explanation: Red blood cells carry oxygen.
        key_terms:
          - term: Iron
            definition: A mineral
            pronunciation: EYE-urn
        clinical_notes: Check ferritin first.
    citations:
      - Camaschella C. Iron-deficiency anemia. N Engl J Med. 2015.
      - id: harrison-ch-93
        kind: textbook
        title: Harrison's Principles of Internal Medicine
        authors: [Loscalzo J]
        chapter: "93"
    cross_references:
      - target_id: hematology-b12-folate-deficiency
        target_type: condition
        relationship: related
      - target_id: itp
        target_type: condition
        relationship: see-also
        label: Platelet disorders
    tags:
      systems: [hematology]
      keywords: [ferritin, hepcidin]
      clinical_relevance: critical
      exam_relevance:
        usmle: true
        shelf: [internal-medicine]
    created_at: '2025-01-30T00:00:00.000Z'
    updated_at: '2025-01-30'
    version: 1
    status: published
    contributors: [Content Team]
"#
        .to_owned()
    }

    #[test]
    fn parses_topic_and_sorts_levels() {
        let topics = TopicDocument::parse(&sample()).expect("parse yaml");
        assert_eq!(topics.len(), 1);
        let topic = &topics[0];
        assert_eq!(topic.content_type, ContentType::Condition);
        let numbers: Vec<u8> = topic.levels.iter().map(|l| l.level).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(
            topic.level(1).and_then(|l| l.key_terms[0].pronunciation.as_deref()),
            Some("EYE-urn")
        );
        assert!(topic.level(5).is_none());
    }

    #[test]
    fn parses_both_citation_shapes() {
        let topics = TopicDocument::parse(&sample()).expect("parse yaml");
        let citations = &topics[0].citations;
        assert!(matches!(citations[0], Citation::Reference(_)));
        match &citations[1] {
            Citation::Source {
                kind,
                chapter,
                authors,
                ..
            } => {
                assert_eq!(kind, "textbook");
                assert_eq!(chapter.as_deref(), Some("93"));
                assert_eq!(authors, &vec!["Loscalzo J".to_owned()]);
            }
            other => panic!("expected structured citation, got {other:?}"),
        }
        assert_eq!(
            citations[1].display_text(),
            "Harrison's Principles of Internal Medicine"
        );
    }

    #[test]
    fn parses_tags_and_cross_references() {
        let topics = TopicDocument::parse(&sample()).expect("parse yaml");
        let topic = &topics[0];
        assert_eq!(topic.tags.clinical_relevance, Some(ClinicalRelevance::Critical));
        let exam = topic.tags.exam_relevance.as_ref().expect("exam relevance");
        assert_eq!(exam.usmle, Some(true));
        assert_eq!(exam.nbme, None);
        assert_eq!(topic.cross_references[1].relationship, Relationship::SeeAlso);
        assert_eq!(
            topic.cross_references[1].label.as_deref(),
            Some("Platelet disorders")
        );
    }

    #[test]
    fn rejects_level_out_of_range() {
        let input = sample().replace("level: 2", "level: 6");
        let err = TopicDocument::parse(&input).expect_err("should reject level 6");
        match err {
            ContentError::InvalidInput(msg) => {
                assert!(msg.contains("topics[0].levels[0].level"), "{msg}")
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_level() {
        let input = sample().replace("level: 2", "level: 1");
        let err = TopicDocument::parse(&input).expect_err("should reject duplicate level");
        assert!(matches!(err, ContentError::InvalidInput(msg) if msg.contains("more than once")));
    }

    #[test]
    fn rejects_unknown_relationship() {
        let input = sample().replace("relationship: see-also", "relationship: cousin");
        let err = TopicDocument::parse(&input).expect_err("should reject relationship");
        match err {
            ContentError::Translation(msg) => {
                assert!(msg.contains("cross_references[1].relationship"), "{msg}")
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_status_is_reported_at_topic_path() {
        let input = sample().replace("    status: published\n", "");
        let err = TopicDocument::parse(&input).expect_err("should require status");
        match err {
            ContentError::Translation(msg) => {
                assert!(msg.contains("topics[0]"), "{msg}");
                assert!(msg.contains("status"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
