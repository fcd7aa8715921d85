//! Hematology entry wire models and translation helpers.
//!
//! Responsibilities:
//! - Define public domain-level types for hematology entries
//! - Define a strict wire model for the `hematology.yaml` document
//! - Translate wire entries into domain entries, validating ids and names

use crate::{expect_specialty, parse_id, parse_name, parse_wire, ContentResult, Vocabulary};
use catalog_types::{EntryId, NonEmptyText};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Hematology subcategory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HematologyCategory {
    Anemia,
    Bleeding,
    Thrombosis,
    Malignancy,
    Transfusion,
    BoneMarrow,
    Platelet,
}

impl Vocabulary for HematologyCategory {
    const ALL: &'static [Self] = &[
        Self::Anemia,
        Self::Bleeding,
        Self::Thrombosis,
        Self::Malignancy,
        Self::Transfusion,
        Self::BoneMarrow,
        Self::Platelet,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Anemia => "anemia",
            Self::Bleeding => "bleeding",
            Self::Thrombosis => "thrombosis",
            Self::Malignancy => "malignancy",
            Self::Transfusion => "transfusion",
            Self::BoneMarrow => "bone-marrow",
            Self::Platelet => "platelet",
        }
    }
}

impl std::fmt::Display for HematologyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hematology condition, procedure or protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HematologyEntry {
    pub id: EntryId,
    pub name: NonEmptyText,
    /// Spanish display name.
    pub localized_name: String,
    pub category: HematologyCategory,
    pub summary: String,
    pub pathophysiology: String,
    pub clinical_features: Vec<String>,
    pub lab_findings: Vec<String>,
    pub diagnostic_workup: Vec<String>,
    pub treatment: String,
    pub monitoring: Vec<String>,
    pub complications: Vec<String>,
    pub prognosis: String,
    pub patient_tip: String,
}

// ============================================================================
// Public HematologyDocument operations
// ============================================================================

/// Hematology document operations.
///
/// This is a zero-sized type used for namespacing operations on `hematology.yaml`.
pub struct HematologyDocument;

impl HematologyDocument {
    /// Wire value of the document's `specialty` header.
    pub const SPECIALTY: &'static str = "hematology";

    /// Parse a hematology document from YAML text.
    ///
    /// Entries are returned in document order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ContentError`] if:
    /// - the YAML does not match the wire schema (including unknown keys),
    /// - a category is not one of the [`HematologyCategory`] members,
    /// - the `specialty` header is not `hematology`,
    /// - an id is not a valid slug or a name is blank.
    pub fn parse(yaml_text: &str) -> ContentResult<Vec<HematologyEntry>> {
        let wire: HematologyDocumentWire = parse_wire(yaml_text, "Hematology document")?;
        expect_specialty(&wire.specialty, Self::SPECIALTY)?;

        wire.entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| wire_to_domain(entry, &format!("entries[{i}]")))
            .collect()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HematologyDocumentWire {
    specialty: String,
    #[serde(default)]
    entries: Vec<HematologyEntryWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HematologyEntryWire {
    id: String,
    name: String,
    localized_name: String,
    category: HematologyCategory,
    summary: String,
    pathophysiology: String,
    #[serde(default)]
    clinical_features: Vec<String>,
    #[serde(default)]
    lab_findings: Vec<String>,
    #[serde(default)]
    diagnostic_workup: Vec<String>,
    treatment: String,
    #[serde(default)]
    monitoring: Vec<String>,
    #[serde(default)]
    complications: Vec<String>,
    prognosis: String,
    patient_tip: String,
}

fn wire_to_domain(wire: HematologyEntryWire, position: &str) -> ContentResult<HematologyEntry> {
    Ok(HematologyEntry {
        id: parse_id(&wire.id, position)?,
        name: parse_name(&wire.name, position)?,
        localized_name: wire.localized_name,
        category: wire.category,
        summary: wire.summary,
        pathophysiology: wire.pathophysiology,
        clinical_features: wire.clinical_features,
        lab_findings: wire.lab_findings,
        diagnostic_workup: wire.diagnostic_workup,
        treatment: wire.treatment,
        monitoring: wire.monitoring,
        complications: wire.complications,
        prognosis: wire.prognosis,
        patient_tip: wire.patient_tip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentError;

    const SAMPLE: &str = r#"specialty: hematology
entries:
  - id: itp
    name: Immune Thrombocytopenia (ITP)
    localized_name: Trombocitopenia inmune
    category: platelet
    summary: Autoimmune destruction of platelets by antiplatelet antibodies.
    pathophysiology: IgG autoantibodies coat platelets.
    clinical_features:
      - Petechiae and purpura
    lab_findings:
      - Isolated thrombocytopenia (<100K)
    diagnostic_workup:
      - CBC with peripheral smear
    treatment: Corticosteroids first-line.
    monitoring: []
    complications: []
    prognosis: Good.
    patient_tip: Avoid contact sports when counts are low.
"#;

    #[test]
    fn parses_sample_document() {
        let entries = HematologyDocument::parse(SAMPLE).expect("parse yaml");
        assert_eq!(entries.len(), 1);
        let itp = &entries[0];
        assert_eq!(itp.id.as_str(), "itp");
        assert_eq!(itp.category, HematologyCategory::Platelet);
        assert_eq!(itp.clinical_features, vec!["Petechiae and purpura"]);
        assert!(itp.monitoring.is_empty());
    }

    #[test]
    fn rejects_unknown_category() {
        let input = SAMPLE.replace("category: platelet", "category: vascular");
        let err = HematologyDocument::parse(&input).expect_err("should reject category");
        match err {
            ContentError::Translation(msg) => {
                assert!(msg.contains("entries[0].category"), "{msg}");
                assert!(msg.contains("vascular"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let input = SAMPLE.replace("patient_tip:", "unexpected_key: x\n    patient_tip:");
        let err = HematologyDocument::parse(&input).expect_err("should reject unknown key");
        match err {
            ContentError::Translation(msg) => assert!(msg.contains("unexpected_key"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_specialty_header() {
        let input = SAMPLE.replace("specialty: hematology", "specialty: neurology");
        let err = HematologyDocument::parse(&input).expect_err("should reject header");
        match err {
            ContentError::InvalidInput(msg) => {
                assert!(msg.contains("hematology"));
                assert!(msg.contains("neurology"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_id() {
        let input = SAMPLE.replace("id: itp", "id: Immune TP");
        let err = HematologyDocument::parse(&input).expect_err("should reject id");
        match err {
            ContentError::InvalidInput(msg) => assert!(msg.contains("entries[0].id"), "{msg}"),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn category_wire_values_round_trip_through_vocabulary() {
        for category in HematologyCategory::ALL {
            assert_eq!(
                HematologyCategory::from_wire(category.as_str()),
                Some(*category)
            );
        }
        assert_eq!(HematologyCategory::from_wire("Platelet"), None);
    }
}
