//! Specialty selection at string boundaries.
//!
//! REST paths, gRPC requests and CLI arguments name a specialty as text. [`Specialty`] parses
//! that text, and [`SpecialtyCatalog`] / [`EntryRef`] let callers work with either specialty
//! catalog without matching on it at every call site.

use crate::catalog::{Catalog, CatalogRecord};
use crate::constants::{HEMATOLOGY_CATALOG, NEUROLOGY_CATALOG};
use crate::{CatalogError, CatalogResult};
use content::{EducationalContent, HematologyEntry, NeurologyEntry, Vocabulary};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specialty {
    Hematology,
    Neurology,
}

impl Specialty {
    pub const ALL: [Specialty; 2] = [Specialty::Hematology, Specialty::Neurology];

    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::Hematology => HEMATOLOGY_CATALOG,
            Specialty::Neurology => NEUROLOGY_CATALOG,
        }
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Specialty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .into_iter()
            .find(|specialty| specialty.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidSpecialty(s.to_owned()))
    }
}

/// A borrowed entry from either specialty catalog.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(untagged)]
pub enum EntryRef<'a> {
    Hematology(&'a HematologyEntry),
    Neurology(&'a NeurologyEntry),
}

impl<'a> EntryRef<'a> {
    pub fn specialty(&self) -> Specialty {
        match self {
            EntryRef::Hematology(_) => Specialty::Hematology,
            EntryRef::Neurology(_) => Specialty::Neurology,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            EntryRef::Hematology(e) => e.id.as_str(),
            EntryRef::Neurology(e) => e.id.as_str(),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            EntryRef::Hematology(e) => e.name.as_str(),
            EntryRef::Neurology(e) => e.name.as_str(),
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            EntryRef::Hematology(e) => e.category.as_str(),
            EntryRef::Neurology(e) => e.category.as_str(),
        }
    }

    pub fn summary(&self) -> &'a str {
        match self {
            EntryRef::Hematology(e) => &e.summary,
            EntryRef::Neurology(e) => &e.summary,
        }
    }
}

/// Any record a cross-reference can point at.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(untagged)]
pub enum RecordRef<'a> {
    Entry(EntryRef<'a>),
    Topic(&'a EducationalContent),
}

impl<'a> RecordRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            RecordRef::Entry(entry) => entry.id(),
            RecordRef::Topic(topic) => topic.id.as_str(),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            RecordRef::Entry(entry) => entry.name(),
            RecordRef::Topic(topic) => topic.name.as_str(),
        }
    }

    /// `hematology`, `neurology` or `topics`.
    pub fn catalog(&self) -> &'static str {
        match self {
            RecordRef::Entry(entry) => entry.specialty().as_str(),
            RecordRef::Topic(_) => crate::constants::TOPICS_CATALOG,
        }
    }
}

/// One specialty catalog, selected at runtime.
#[derive(Clone, Copy, Debug)]
pub enum SpecialtyCatalog<'a> {
    Hematology(&'a Catalog<HematologyEntry>),
    Neurology(&'a Catalog<NeurologyEntry>),
}

impl<'a> SpecialtyCatalog<'a> {
    pub fn specialty(&self) -> Specialty {
        match self {
            SpecialtyCatalog::Hematology(_) => Specialty::Hematology,
            SpecialtyCatalog::Neurology(_) => Specialty::Neurology,
        }
    }

    pub fn get(&self, id: &str) -> Option<EntryRef<'a>> {
        match *self {
            SpecialtyCatalog::Hematology(c) => c.get(id).map(EntryRef::Hematology),
            SpecialtyCatalog::Neurology(c) => c.get(id).map(EntryRef::Neurology),
        }
    }

    pub fn require(&self, id: &str) -> CatalogResult<EntryRef<'a>> {
        match *self {
            SpecialtyCatalog::Hematology(c) => c.require(id).map(EntryRef::Hematology),
            SpecialtyCatalog::Neurology(c) => c.require(id).map(EntryRef::Neurology),
        }
    }

    pub fn search(&self, query: &str) -> Vec<EntryRef<'a>> {
        match *self {
            SpecialtyCatalog::Hematology(c) => {
                c.search(query).into_iter().map(EntryRef::Hematology).collect()
            }
            SpecialtyCatalog::Neurology(c) => {
                c.search(query).into_iter().map(EntryRef::Neurology).collect()
            }
        }
    }

    /// Records in the category named by `category`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidCategory`] when `category` is not in this specialty's vocabulary.
    pub fn by_category(&self, category: &str) -> CatalogResult<Vec<EntryRef<'a>>> {
        self.filter(Some(category), None)
    }

    /// See [`Catalog::filter`].
    pub fn filter(
        &self,
        category: Option<&str>,
        query: Option<&str>,
    ) -> CatalogResult<Vec<EntryRef<'a>>> {
        Ok(match *self {
            SpecialtyCatalog::Hematology(c) => c
                .filter(category, query)?
                .into_iter()
                .map(EntryRef::Hematology)
                .collect(),
            SpecialtyCatalog::Neurology(c) => c
                .filter(category, query)?
                .into_iter()
                .map(EntryRef::Neurology)
                .collect(),
        })
    }

    pub fn count(&self) -> usize {
        match self {
            SpecialtyCatalog::Hematology(c) => c.count(),
            SpecialtyCatalog::Neurology(c) => c.count(),
        }
    }

    pub fn iter(&self) -> Vec<EntryRef<'a>> {
        match *self {
            SpecialtyCatalog::Hematology(c) => c.iter().map(EntryRef::Hematology).collect(),
            SpecialtyCatalog::Neurology(c) => c.iter().map(EntryRef::Neurology).collect(),
        }
    }

    /// Wire spellings of every category with its record count.
    pub fn category_counts(&self) -> Vec<(&'static str, usize)> {
        fn named<R: CatalogRecord>(c: &Catalog<R>) -> Vec<(&'static str, usize)> {
            c.category_counts()
                .into_iter()
                .map(|(category, n)| (category.as_str(), n))
                .collect()
        }

        match self {
            SpecialtyCatalog::Hematology(c) => named(c),
            SpecialtyCatalog::Neurology(c) => named(c),
        }
    }
}

impl Catalog<NeurologyEntry> {
    /// Entries whose emergency signs contain `query`, case-insensitively.
    pub fn search_emergencies(&self, query: &str) -> Vec<&NeurologyEntry> {
        let query_lower = query.to_lowercase();
        self.iter()
            .filter(|entry| {
                entry
                    .emergency_signs
                    .iter()
                    .any(|sign| sign.to_lowercase().contains(&query_lower))
            })
            .collect()
    }

    /// ICD-11 code to entry name, ordered by code.
    ///
    /// Entries sharing a code map to the last name in catalog order.
    pub fn icd11_map(&self) -> BTreeMap<&str, &str> {
        self.iter()
            .map(|entry| (entry.icd11.as_str(), entry.name.as_str()))
            .collect()
    }
}
