//! Read-only lookup, search and category filtering over one set of records.
//!
//! A [`Catalog`] is built once from parsed content and never mutated. Records keep the order
//! in which they were authored; every query returns records in that order.

use crate::{CatalogError, CatalogResult};
use content::{HematologyCategory, HematologyEntry, NeurologyCategory, NeurologyEntry, Vocabulary};
use std::collections::HashMap;

/// A record that can be stored in a [`Catalog`].
pub trait CatalogRecord {
    /// The closed set of categories this record type is filed under.
    type Category: Vocabulary;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn category(&self) -> Self::Category;

    /// Text fields searched by [`Catalog::search`].
    fn search_fields(&self) -> Vec<&str>;
}

/// An immutable, id-indexed collection of records.
#[derive(Debug)]
pub struct Catalog<R> {
    name: &'static str,
    records: Vec<R>,
    index: HashMap<String, usize>,
}

impl<R: CatalogRecord> Catalog<R> {
    /// Build a catalog from records in authored order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two records share an id.
    pub fn new(name: &'static str, records: Vec<R>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id().to_owned(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    catalog: name,
                    id: record.id().to_owned(),
                });
            }
        }

        Ok(Self {
            name,
            records,
            index,
        })
    }

    /// Name used in errors and logs, e.g. `hematology`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Exact id lookup. A miss is `None`, not an error.
    pub fn get(&self, id: &str) -> Option<&R> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Like [`Catalog::get`], but a miss is [`CatalogError::NotFound`].
    pub fn require(&self, id: &str) -> CatalogResult<&R> {
        self.get(id).ok_or_else(|| CatalogError::NotFound {
            catalog: self.name,
            id: id.to_owned(),
        })
    }

    /// Case-insensitive substring search across each record's search fields.
    ///
    /// The query is matched literally as one substring. An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&R> {
        let query_lower = query.to_lowercase();

        self.records
            .iter()
            .filter(|record| matches_query(*record, &query_lower))
            .collect()
    }

    /// Records filed under `category`.
    pub fn by_category(&self, category: R::Category) -> Vec<&R> {
        self.records
            .iter()
            .filter(|record| record.category() == category)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// Every member of the category vocabulary, whether or not any record uses it.
    pub fn categories(&self) -> &'static [R::Category] {
        R::Category::ALL
    }

    /// Number of records per category, in vocabulary order, including empty categories.
    pub fn category_counts(&self) -> Vec<(R::Category, usize)> {
        R::Category::ALL
            .iter()
            .map(|&category| {
                let n = self
                    .records
                    .iter()
                    .filter(|record| record.category() == category)
                    .count();
                (category, n)
            })
            .collect()
    }

    /// Parse a category string supplied at an API or CLI boundary.
    pub fn parse_category(&self, value: &str) -> CatalogResult<R::Category> {
        R::Category::from_wire(value).ok_or_else(|| CatalogError::InvalidCategory {
            catalog: self.name,
            value: value.to_owned(),
        })
    }

    /// Apply an optional category filter, then an optional search query.
    ///
    /// With neither, every record is returned.
    pub fn filter(&self, category: Option<&str>, query: Option<&str>) -> CatalogResult<Vec<&R>> {
        let mut records = match category {
            Some(value) => self.by_category(self.parse_category(value)?),
            None => self.records.iter().collect(),
        };

        if let Some(query) = query {
            let query_lower = query.to_lowercase();
            records.retain(|record| matches_query(*record, &query_lower));
        }

        Ok(records)
    }
}

fn matches_query<R: CatalogRecord>(record: &R, query_lower: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(query_lower))
}

impl CatalogRecord for HematologyEntry {
    type Category = HematologyCategory;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn category(&self) -> HematologyCategory {
        self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.localized_name.as_str(),
            self.summary.as_str(),
            self.category.as_str(),
        ];
        fields.extend(self.clinical_features.iter().map(String::as_str));
        fields.extend(self.lab_findings.iter().map(String::as_str));
        fields
    }
}

impl CatalogRecord for NeurologyEntry {
    type Category = NeurologyCategory;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn category(&self) -> NeurologyCategory {
        self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.localized_name.as_str(),
            self.summary.as_str(),
            self.category.as_str(),
        ];
        fields.extend(self.clinical_features.iter().map(String::as_str));
        fields.extend(self.diagnostics.iter().map(String::as_str));
        fields.extend(self.treatment.iter().map(String::as_str));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Library;
    use content::{HematologyDocument, NeurologyDocument};

    fn hematology() -> Catalog<HematologyEntry> {
        let library = Library::embedded().expect("embedded library");
        let entries = library.hematology().iter().cloned().collect();
        Catalog::new("hematology", entries).expect("catalog")
    }

    fn neurology() -> Catalog<NeurologyEntry> {
        let library = Library::embedded().expect("embedded library");
        let entries = library.neurology().iter().cloned().collect();
        Catalog::new("neurology", entries).expect("catalog")
    }

    fn ids<R: CatalogRecord>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.id().to_owned()).collect()
    }

    #[test]
    fn get_returns_itp() {
        let catalog = hematology();
        let itp = catalog.get("itp").expect("itp present");
        assert_eq!(itp.name.as_str(), "Immune Thrombocytopenia (ITP)");
        assert_eq!(itp.category, HematologyCategory::Platelet);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let catalog = hematology();
        assert!(catalog.get("nonexistent-id").is_none());
        assert!(catalog.get("").is_none());
        assert!(catalog.get("ITP").is_none());
    }

    #[test]
    fn require_unknown_id_is_not_found() {
        let catalog = hematology();
        let err = catalog.require("nonexistent-id").expect_err("miss");
        assert!(matches!(
            err,
            CatalogError::NotFound { catalog: "hematology", ref id } if id == "nonexistent-id"
        ));
    }

    #[test]
    fn every_loaded_id_resolves() {
        let catalog = hematology();
        for record in catalog.iter() {
            let found = catalog.get(record.id()).expect("id resolves");
            assert_eq!(found.id, record.id);
        }
    }

    #[test]
    fn search_thrombocytopenia_includes_platelet_disorders() {
        let catalog = hematology();
        let hits = ids(&catalog.search("thrombocytopenia"));
        for expected in ["itp", "ttp", "hit", "dic"] {
            assert!(hits.iter().any(|id| id == expected), "missing {expected}");
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = hematology();
        assert_eq!(
            ids(&catalog.search("THROMBOCYTOPENIA")),
            ids(&catalog.search("thrombocytopenia"))
        );
    }

    #[test]
    fn search_matches_localized_name() {
        let catalog = hematology();
        let itp = catalog.get("itp").expect("itp");
        let hits = ids(&catalog.search(&itp.localized_name.to_uppercase()));
        assert!(hits.contains(&"itp".to_owned()));
    }

    #[test]
    fn search_matches_category_text() {
        let catalog = hematology();
        let hits = catalog.search("bone-marrow");
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|r| r.search_fields().iter().any(|f| f.contains("bone-marrow"))));
    }

    #[test]
    fn empty_query_returns_every_record_in_order() {
        let catalog = hematology();
        let all = catalog.search("");
        assert_eq!(all.len(), 25);
        let in_order: Vec<&HematologyEntry> = catalog.iter().collect();
        assert_eq!(ids(&all), ids(&in_order));
    }

    #[test]
    fn search_finds_every_record_by_its_own_name() {
        let catalog = hematology();
        for record in catalog.iter() {
            let hits = catalog.search(record.name.as_str());
            assert!(hits.iter().any(|r| r.id == record.id), "{}", record.id);
        }
    }

    #[test]
    fn every_search_hit_contains_the_query() {
        let catalog = hematology();
        for query in ["anemia", "iron", "transfusion", "vwf"] {
            for hit in catalog.search(query) {
                assert!(
                    hit.search_fields()
                        .iter()
                        .any(|f| f.to_lowercase().contains(query)),
                    "{} does not contain {query}",
                    hit.id
                );
            }
        }
    }

    #[test]
    fn search_results_have_no_duplicates() {
        let catalog = hematology();
        let hits = ids(&catalog.search("a"));
        let mut deduped = hits.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(hits.len(), deduped.len());
    }

    #[test]
    fn multi_word_query_matches_literally() {
        let catalog = hematology();
        assert!(catalog.search("thrombocytopenia immune").is_empty());
        assert!(!catalog.search("immune thrombocytopenia").is_empty());
    }

    #[test]
    fn platelet_category_is_exact() {
        let catalog = hematology();
        let hits = ids(&catalog.by_category(HematologyCategory::Platelet));
        assert_eq!(hits, vec!["itp", "ttp", "thrombocytosis"]);
    }

    #[test]
    fn categories_partition_the_store() {
        let catalog = hematology();
        let mut seen: Vec<String> = Vec::new();
        for &category in catalog.categories() {
            for record in catalog.by_category(category) {
                assert!(!seen.contains(&record.id().to_owned()), "{} twice", record.id);
                seen.push(record.id().to_owned());
            }
        }
        assert_eq!(seen.len(), catalog.count());
    }

    #[test]
    fn category_counts_sum_to_count() {
        let catalog = hematology();
        let counts = catalog.category_counts();
        assert_eq!(counts.len(), HematologyCategory::ALL.len());
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, catalog.count());
        assert!(counts.contains(&(HematologyCategory::Platelet, 3)));
    }

    #[test]
    fn count_is_25_and_stable() {
        let catalog = hematology();
        assert_eq!(catalog.count(), 25);
        assert_eq!(catalog.count(), catalog.iter().count());
        assert_eq!(ids(&catalog.search("iron")), ids(&catalog.search("iron")));
    }

    #[test]
    fn parse_category_rejects_unknown_value() {
        let catalog = hematology();
        assert_eq!(
            catalog.parse_category("bone-marrow").expect("valid"),
            HematologyCategory::BoneMarrow
        );
        let err = catalog.parse_category("vascular").expect_err("invalid");
        assert!(matches!(
            err,
            CatalogError::InvalidCategory { ref value, .. } if value == "vascular"
        ));
    }

    #[test]
    fn filter_applies_category_then_query() {
        let catalog = hematology();
        let all = catalog.filter(None, None).expect("filter");
        assert_eq!(all.len(), catalog.count());

        let platelet_ttp = catalog
            .filter(Some("platelet"), Some("purpura"))
            .expect("filter");
        assert!(platelet_ttp
            .iter()
            .all(|r| r.category == HematologyCategory::Platelet));

        assert!(catalog.filter(Some("nope"), Some("itp")).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"specialty: hematology
entries:
  - id: itp
    name: First
    localized_name: Primero
    category: platelet
    summary: s
    pathophysiology: p
    treatment: t
    prognosis: p
    patient_tip: t
  - id: itp
    name: Second
    localized_name: Segundo
    category: platelet
    summary: s
    pathophysiology: p
    treatment: t
    prognosis: p
    patient_tip: t
"#;
        let entries = HematologyDocument::parse(yaml).expect("parse");
        let err = Catalog::new("hematology", entries).expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateId { ref id, .. } if id == "itp"));
    }

    #[test]
    fn neurology_empty_query_returns_every_record_in_order() {
        let catalog = neurology();
        let all = catalog.search("");
        assert_eq!(all.len(), 51);
        let in_order: Vec<&NeurologyEntry> = catalog.iter().collect();
        assert_eq!(ids(&all), ids(&in_order));
    }

    #[test]
    fn neurology_search_finds_every_record_by_its_own_name() {
        let catalog = neurology();
        for record in catalog.iter() {
            let hits = catalog.search(record.name.as_str());
            assert!(hits.iter().any(|r| r.id == record.id), "{}", record.id);
        }
    }

    #[test]
    fn every_neurology_search_hit_contains_the_query() {
        let catalog = neurology();
        for query in ["stroke", "seizure", "mri", "levodopa", "movement-disorder"] {
            let hits = catalog.search(query);
            assert!(!hits.is_empty(), "no hits for {query}");
            for hit in hits {
                assert!(
                    hit.search_fields()
                        .iter()
                        .any(|f| f.to_lowercase().contains(query)),
                    "{} does not contain {query}",
                    hit.id
                );
            }
        }
        assert_eq!(ids(&catalog.search("stroke")), ids(&catalog.search("stroke")));
    }

    #[test]
    fn neurology_search_matches_treatment() {
        let catalog = neurology();
        let hits = ids(&catalog.search("riluzole"));
        assert_eq!(hits, vec!["amyotrophic-lateral-sclerosis"]);
    }

    #[test]
    fn neurology_search_matches_category_text() {
        let catalog = neurology();
        let hits = catalog.search("movement-disorder");
        let expected = ids(&catalog.by_category(NeurologyCategory::MovementDisorder));
        assert!(!expected.is_empty());
        for id in &expected {
            assert!(ids(&hits).contains(id), "missing {id}");
        }
    }

    #[test]
    fn neurology_treatment_only_match_in_fixture() {
        let yaml = r#"specialty: neurology
entries:
  - id: myasthenia-gravis
    name: Myasthenia Gravis
    localized_name: Miastenia grave
    category: neuromuscular
    icd11: 8C60
    summary: Autoimmune disorder of the neuromuscular junction.
    pathophysiology: Antibodies against acetylcholine receptors.
    clinical_features:
      - Fatigable ptosis
    diagnostics:
      - AChR antibodies
    treatment:
      - Pyridostigmine
    prognosis: Good with treatment.
    patient_explanation: Weakness that worsens with use.
    emergency_signs:
      - Breathing difficulty
"#;
        let entries = NeurologyDocument::parse(yaml).expect("parse");
        let catalog = Catalog::new("neurology", entries).expect("catalog");
        assert_eq!(ids(&catalog.search("PYRIDOSTIGMINE")), vec!["myasthenia-gravis"]);
    }
}
