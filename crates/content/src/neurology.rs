//! Neurology entry wire models and translation helpers.
//!
//! Mirrors [`crate::hematology`] for the `neurology.yaml` document. Neurology entries carry an
//! ICD-11 code and a list of emergency signs; their `treatment` is a list rather than prose.

use crate::{expect_specialty, parse_id, parse_name, parse_wire, ContentResult, Vocabulary};
use catalog_types::{EntryId, NonEmptyText};
use serde::{Deserialize, Serialize};

/// Neurology subcategory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeurologyCategory {
    Cerebrovascular,
    Seizure,
    Neurodegenerative,
    Demyelinating,
    Neuromuscular,
    Headache,
    MovementDisorder,
    NeuroOncology,
    Infectious,
    Trauma,
}

impl Vocabulary for NeurologyCategory {
    const ALL: &'static [Self] = &[
        Self::Cerebrovascular,
        Self::Seizure,
        Self::Neurodegenerative,
        Self::Demyelinating,
        Self::Neuromuscular,
        Self::Headache,
        Self::MovementDisorder,
        Self::NeuroOncology,
        Self::Infectious,
        Self::Trauma,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Cerebrovascular => "cerebrovascular",
            Self::Seizure => "seizure",
            Self::Neurodegenerative => "neurodegenerative",
            Self::Demyelinating => "demyelinating",
            Self::Neuromuscular => "neuromuscular",
            Self::Headache => "headache",
            Self::MovementDisorder => "movement-disorder",
            Self::NeuroOncology => "neuro-oncology",
            Self::Infectious => "infectious",
            Self::Trauma => "trauma",
        }
    }
}

impl std::fmt::Display for NeurologyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One neurology condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NeurologyEntry {
    pub id: EntryId,
    pub name: NonEmptyText,
    pub localized_name: String,
    pub category: NeurologyCategory,
    /// ICD-11 code as authored, e.g. `8B11` or `8A01.10`. Shape is checked by the validator.
    pub icd11: String,
    pub summary: String,
    pub pathophysiology: String,
    pub clinical_features: Vec<String>,
    pub diagnostics: Vec<String>,
    pub treatment: Vec<String>,
    pub prognosis: String,
    pub patient_explanation: String,
    pub emergency_signs: Vec<String>,
}

/// Neurology document operations.
pub struct NeurologyDocument;

impl NeurologyDocument {
    pub const SPECIALTY: &'static str = "neurology";

    /// Parse a neurology document from YAML text, in document order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`crate::HematologyDocument::parse`], against the
    /// [`NeurologyCategory`] vocabulary and a `neurology` header.
    pub fn parse(yaml_text: &str) -> ContentResult<Vec<NeurologyEntry>> {
        let wire: NeurologyDocumentWire = parse_wire(yaml_text, "Neurology document")?;
        expect_specialty(&wire.specialty, Self::SPECIALTY)?;

        wire.entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| wire_to_domain(entry, &format!("entries[{i}]")))
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NeurologyDocumentWire {
    specialty: String,
    #[serde(default)]
    entries: Vec<NeurologyEntryWire>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NeurologyEntryWire {
    id: String,
    name: String,
    localized_name: String,
    category: NeurologyCategory,
    icd11: String,
    summary: String,
    pathophysiology: String,
    #[serde(default)]
    clinical_features: Vec<String>,
    #[serde(default)]
    diagnostics: Vec<String>,
    #[serde(default)]
    treatment: Vec<String>,
    prognosis: String,
    patient_explanation: String,
    #[serde(default)]
    emergency_signs: Vec<String>,
}

fn wire_to_domain(wire: NeurologyEntryWire, position: &str) -> ContentResult<NeurologyEntry> {
    Ok(NeurologyEntry {
        id: parse_id(&wire.id, position)?,
        name: parse_name(&wire.name, position)?,
        localized_name: wire.localized_name,
        category: wire.category,
        icd11: wire.icd11.trim().to_owned(),
        summary: wire.summary,
        pathophysiology: wire.pathophysiology,
        clinical_features: wire.clinical_features,
        diagnostics: wire.diagnostics,
        treatment: wire.treatment,
        prognosis: wire.prognosis,
        patient_explanation: wire.patient_explanation,
        emergency_signs: wire.emergency_signs,
    })
}
