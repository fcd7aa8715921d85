//! The immutable bundle of every catalog, built once at startup.
//!
//! Content is embedded in the binary at build time. Operators can point
//! `CATALOG_CONTENT_DIR` at a directory with the same layout to load it from disk instead;
//! either way the library is fully parsed before any server starts and never changes.

use crate::catalog::Catalog;
use crate::config::CoreConfig;
use crate::constants::{
    HEMATOLOGY_CATALOG, HEMATOLOGY_FILENAME, NEUROLOGY_CATALOG, NEUROLOGY_FILENAME,
    TOPICS_CATALOG, TOPICS_DIR_NAME, TOPIC_FILE_EXTENSION,
};
use crate::specialty::{EntryRef, RecordRef, Specialty, SpecialtyCatalog};
use crate::{CatalogError, CatalogResult};
use content::{
    EducationalContent, HematologyDocument, HematologyEntry, NeurologyDocument, NeurologyEntry,
    TopicDocument,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const EMBEDDED_HEMATOLOGY: &str = include_str!("../content/hematology.yaml");
const EMBEDDED_NEUROLOGY: &str = include_str!("../content/neurology.yaml");
const EMBEDDED_TOPICS: &[(&str, &str)] = &[(
    "anemias.yaml",
    include_str!("../content/topics/anemias.yaml"),
)];

/// Record counts per catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LibrarySummary {
    pub hematology: usize,
    pub neurology: usize,
    pub topics: usize,
}

impl LibrarySummary {
    pub fn total(&self) -> usize {
        self.hematology + self.neurology + self.topics
    }
}

#[derive(Debug)]
pub struct Library {
    hematology: Catalog<HematologyEntry>,
    neurology: Catalog<NeurologyEntry>,
    topics: Catalog<EducationalContent>,
}

impl Library {
    /// Build the library described by `cfg`.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, schema mismatches, unknown vocabulary values, invalid or
    /// duplicate ids.
    pub fn load(cfg: &CoreConfig) -> CatalogResult<Self> {
        match cfg.content_dir() {
            Some(dir) => Self::from_dir(dir),
            None => Self::from_embedded_content(),
        }
    }

    /// The library built from embedded content, parsed on first use and shared afterwards.
    pub fn embedded() -> CatalogResult<&'static Library> {
        static EMBEDDED: OnceLock<Library> = OnceLock::new();

        if let Some(existing) = EMBEDDED.get() {
            return Ok(existing);
        }
        let loaded = Self::from_embedded_content()?;
        Ok(EMBEDDED.get_or_init(move || loaded))
    }

    /// Parse the content embedded in the binary into a fresh library.
    pub fn from_embedded_content() -> CatalogResult<Self> {
        let topic_documents: Vec<(PathBuf, String)> = EMBEDDED_TOPICS
            .iter()
            .map(|(name, text)| (PathBuf::from(TOPICS_DIR_NAME).join(name), (*text).to_owned()))
            .collect();

        Self::from_documents(EMBEDDED_HEMATOLOGY, EMBEDDED_NEUROLOGY, &topic_documents)
    }

    /// Load `hematology.yaml`, `neurology.yaml` and every `topics/*.yaml` under `dir`.
    ///
    /// Topic documents are read in file-name order.
    pub fn from_dir(dir: &Path) -> CatalogResult<Self> {
        let hematology = read_document(&dir.join(HEMATOLOGY_FILENAME))?;
        let neurology = read_document(&dir.join(NEUROLOGY_FILENAME))?;

        let topics_dir = dir.join(TOPICS_DIR_NAME);
        let entries = std::fs::read_dir(&topics_dir).map_err(|source| CatalogError::ContentRead {
            path: topics_dir.clone(),
            source,
        })?;

        let mut topic_paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::ContentRead {
                path: topics_dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_topic_file = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(TOPIC_FILE_EXTENSION);
            if is_topic_file {
                topic_paths.push(path);
            }
        }
        topic_paths.sort();

        let topic_documents = topic_paths
            .into_iter()
            .map(|path| read_document(&path).map(|text| (path, text)))
            .collect::<CatalogResult<Vec<_>>>()?;

        tracing::info!(
            dir = %dir.display(),
            topic_files = topic_documents.len(),
            "loading content from directory"
        );

        Self::from_documents(&hematology, &neurology, &topic_documents)
    }

    /// Parse YAML documents into a library. Topic documents are `(origin, text)` pairs; the
    /// origin only appears in logs.
    pub fn from_documents(
        hematology_yaml: &str,
        neurology_yaml: &str,
        topic_documents: &[(PathBuf, String)],
    ) -> CatalogResult<Self> {
        let hematology = HematologyDocument::parse(hematology_yaml).inspect_err(|err| {
            tracing::error!(document = HEMATOLOGY_FILENAME, "failed to parse content: {err}")
        })?;
        let neurology = NeurologyDocument::parse(neurology_yaml).inspect_err(|err| {
            tracing::error!(document = NEUROLOGY_FILENAME, "failed to parse content: {err}")
        })?;

        let mut topics = Vec::new();
        for (origin, text) in topic_documents {
            let parsed = TopicDocument::parse(text).inspect_err(|err| {
                tracing::error!(document = %origin.display(), "failed to parse content: {err}")
            })?;
            topics.extend(parsed);
        }

        let library = Self {
            hematology: Catalog::new(HEMATOLOGY_CATALOG, hematology)?,
            neurology: Catalog::new(NEUROLOGY_CATALOG, neurology)?,
            topics: Catalog::new(TOPICS_CATALOG, topics)?,
        };

        let summary = library.summary();
        tracing::info!(
            hematology = summary.hematology,
            neurology = summary.neurology,
            topics = summary.topics,
            "content library loaded"
        );

        Ok(library)
    }

    pub fn hematology(&self) -> &Catalog<HematologyEntry> {
        &self.hematology
    }

    pub fn neurology(&self) -> &Catalog<NeurologyEntry> {
        &self.neurology
    }

    pub fn topics(&self) -> &Catalog<EducationalContent> {
        &self.topics
    }

    pub fn specialty(&self, specialty: Specialty) -> SpecialtyCatalog<'_> {
        match specialty {
            Specialty::Hematology => SpecialtyCatalog::Hematology(&self.hematology),
            Specialty::Neurology => SpecialtyCatalog::Neurology(&self.neurology),
        }
    }

    /// Look up a specialty by its wire name, e.g. from a URL path segment.
    pub fn specialty_named(&self, name: &str) -> CatalogResult<SpecialtyCatalog<'_>> {
        Ok(self.specialty(name.parse()?))
    }

    /// Find a record by id in any catalog. Specialty catalogs are searched first.
    pub fn find_record(&self, id: &str) -> Option<RecordRef<'_>> {
        if let Some(entry) = self.hematology.get(id) {
            return Some(RecordRef::Entry(EntryRef::Hematology(entry)));
        }
        if let Some(entry) = self.neurology.get(id) {
            return Some(RecordRef::Entry(EntryRef::Neurology(entry)));
        }
        self.topics.get(id).map(RecordRef::Topic)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_record(id).is_some()
    }

    pub fn summary(&self) -> LibrarySummary {
        LibrarySummary {
            hematology: self.hematology.count(),
            neurology: self.neurology.count(),
            topics: self.topics.count(),
        }
    }
}

fn read_document(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::ContentRead {
        path: path.to_path_buf(),
        source,
    })
}
