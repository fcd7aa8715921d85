//! Conversions from core records to protobuf messages.
//!
//! Both specialties map onto the single `Entry` message. Hematology has prose `treatment`,
//! `diagnostic_workup` and `patient_tip`; these land in `treatment` (one element),
//! `diagnostics` and `patient_explanation`.

use crate::pb;
use catalog_core::{
    EducationalContent, EntryRef, HematologyEntry, KeyTerm, LevelContent, NeurologyEntry,
    ResolvedCrossReference, Specialty, Vocabulary,
};

impl From<&HematologyEntry> for pb::Entry {
    fn from(entry: &HematologyEntry) -> Self {
        pb::Entry {
            specialty: Specialty::Hematology.as_str().into(),
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            localized_name: entry.localized_name.clone(),
            category: entry.category.as_str().into(),
            summary: entry.summary.clone(),
            pathophysiology: entry.pathophysiology.clone(),
            clinical_features: entry.clinical_features.clone(),
            lab_findings: entry.lab_findings.clone(),
            diagnostics: entry.diagnostic_workup.clone(),
            treatment: vec![entry.treatment.clone()],
            monitoring: entry.monitoring.clone(),
            complications: entry.complications.clone(),
            prognosis: entry.prognosis.clone(),
            patient_explanation: entry.patient_tip.clone(),
            icd11: String::new(),
            emergency_signs: Vec::new(),
        }
    }
}

impl From<&NeurologyEntry> for pb::Entry {
    fn from(entry: &NeurologyEntry) -> Self {
        pb::Entry {
            specialty: Specialty::Neurology.as_str().into(),
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            localized_name: entry.localized_name.clone(),
            category: entry.category.as_str().into(),
            summary: entry.summary.clone(),
            pathophysiology: entry.pathophysiology.clone(),
            clinical_features: entry.clinical_features.clone(),
            lab_findings: Vec::new(),
            diagnostics: entry.diagnostics.clone(),
            treatment: entry.treatment.clone(),
            monitoring: Vec::new(),
            complications: Vec::new(),
            prognosis: entry.prognosis.clone(),
            patient_explanation: entry.patient_explanation.clone(),
            icd11: entry.icd11.clone(),
            emergency_signs: entry.emergency_signs.clone(),
        }
    }
}

impl From<EntryRef<'_>> for pb::Entry {
    fn from(entry: EntryRef<'_>) -> Self {
        match entry {
            EntryRef::Hematology(e) => e.into(),
            EntryRef::Neurology(e) => e.into(),
        }
    }
}

impl From<&KeyTerm> for pb::KeyTerm {
    fn from(key_term: &KeyTerm) -> Self {
        pb::KeyTerm {
            term: key_term.term.clone(),
            definition: key_term.definition.clone(),
            pronunciation: key_term.pronunciation.clone().unwrap_or_default(),
        }
    }
}

impl From<&LevelContent> for pb::Level {
    fn from(level: &LevelContent) -> Self {
        pb::Level {
            level: u32::from(level.level),
            summary: level.summary.clone(),
            explanation: level.explanation.clone(),
            key_terms: level.key_terms.iter().map(Into::into).collect(),
            analogies: level.analogies.clone(),
            examples: level.examples.clone(),
            clinical_notes: level.clinical_notes.clone().unwrap_or_default(),
            patient_counseling_points: level.patient_counseling_points.clone(),
        }
    }
}

impl From<ResolvedCrossReference<'_>> for pb::CrossReference {
    fn from(resolved: ResolvedCrossReference<'_>) -> Self {
        let reference = resolved.reference;
        pb::CrossReference {
            target_id: reference.target_id.clone(),
            target_type: reference.target_type.as_str().into(),
            relationship: reference.relationship.as_str().into(),
            label: reference.label.clone().unwrap_or_default(),
            resolved: resolved.is_resolved(),
            target_name: resolved
                .target
                .map(|t| t.name().to_owned())
                .unwrap_or_default(),
            target_catalog: resolved
                .target
                .map(|t| t.catalog().to_owned())
                .unwrap_or_default(),
        }
    }
}

/// Convert a topic. `cross_references` are supplied already resolved against the library.
pub fn topic_to_pb(
    topic: &EducationalContent,
    cross_references: Vec<ResolvedCrossReference<'_>>,
) -> pb::Topic {
    pb::Topic {
        id: topic.id.to_string(),
        content_type: topic.content_type.as_str().into(),
        name: topic.name.to_string(),
        localized_name: topic.localized_name.clone().unwrap_or_default(),
        alternate_names: topic.alternate_names.clone(),
        levels: topic.levels.iter().map(Into::into).collect(),
        citations: topic
            .citations
            .iter()
            .map(|c| c.display_text().to_owned())
            .collect(),
        cross_references: cross_references.into_iter().map(Into::into).collect(),
        systems: topic.tags.systems.clone(),
        keywords: topic.tags.keywords.clone(),
        clinical_relevance: topic
            .tags
            .clinical_relevance
            .map(|r| r.as_str().to_owned())
            .unwrap_or_default(),
        created_at: topic.created_at.clone(),
        updated_at: topic.updated_at.clone(),
        version: topic.version,
        status: topic.status.as_str().into(),
        contributors: topic.contributors.clone(),
    }
}
