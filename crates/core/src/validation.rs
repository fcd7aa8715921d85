//! Content quality checks.
//!
//! Parsing already guarantees shape (known vocabulary, valid ids, level numbers in range).
//! The checks here cover what the content team reviews before publishing: completeness of the
//! five levels, leftover placeholder text, metadata and cross-reference hygiene. Problems are
//! collected rather than raised so a single run reports everything.

use crate::catalog::CatalogRecord;
use crate::Library;
use content::{EducationalContent, HematologyEntry, NeurologyEntry};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    InterfaceCompliance,
    LevelContent,
    ContentQuality,
    CrossReferences,
    Metadata,
}

impl IssueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::InterfaceCompliance => "interface-compliance",
            IssueCategory::LevelContent => "level-content",
            IssueCategory::ContentQuality => "content-quality",
            IssueCategory::CrossReferences => "cross-references",
            IssueCategory::Metadata => "metadata",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub record_id: String,
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "[{severity}] {} ({}): {}",
            self.record_id,
            self.category.as_str(),
            self.message
        )
    }
}

/// True when any issue has [`Severity::Error`].
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|issue| issue.severity == Severity::Error)
}

/// Run every check over every record in `library`.
///
/// Issues are ordered by catalog (hematology, neurology, topics) and then by record.
pub fn validate_library(library: &Library) -> Vec<ValidationIssue> {
    let mut issues = Issues::default();

    for entry in library.hematology().iter() {
        check_hematology_entry(entry, &mut issues);
    }
    for entry in library.neurology().iter() {
        check_neurology_entry(entry, &mut issues);
    }
    for topic in library.topics().iter() {
        check_topic(topic, library, &mut issues);
    }

    let issues = issues.0;
    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    tracing::info!(
        errors,
        warnings = issues.len() - errors,
        "content validation finished"
    );
    issues
}

#[derive(Default)]
struct Issues(Vec<ValidationIssue>);

impl Issues {
    fn push(&mut self, record_id: &str, severity: Severity, category: IssueCategory, message: String) {
        self.0.push(ValidationIssue {
            record_id: record_id.to_owned(),
            severity,
            category,
            message,
        });
    }

    fn error(&mut self, record_id: &str, category: IssueCategory, message: String) {
        self.push(record_id, Severity::Error, category, message);
    }

    fn warning(&mut self, record_id: &str, category: IssueCategory, message: String) {
        self.push(record_id, Severity::Warning, category, message);
    }

    fn placeholders(&mut self, record_id: &str, field: &str, text: &str) {
        if let Some(word) = find_placeholder(text) {
            self.error(
                record_id,
                IssueCategory::ContentQuality,
                format!("{field} contains placeholder text '{word}'"),
            );
        }
    }
}

fn check_entry_common<R: CatalogRecord>(
    record: &R,
    localized_name: &str,
    summary: &str,
    issues: &mut Issues,
) {
    let id = record.id();
    issues.placeholders(id, "name", record.name());
    issues.placeholders(id, "summary", summary);

    if localized_name.trim().is_empty() {
        issues.warning(id, IssueCategory::ContentQuality, "missing localized name".into());
    }
    if summary.trim().is_empty() {
        issues.error(id, IssueCategory::ContentQuality, "summary is empty".into());
    }
}

fn check_hematology_entry(entry: &HematologyEntry, issues: &mut Issues) {
    check_entry_common(entry, &entry.localized_name, &entry.summary, issues);
}

fn check_neurology_entry(entry: &NeurologyEntry, issues: &mut Issues) {
    check_entry_common(entry, &entry.localized_name, &entry.summary, issues);

    if !is_icd11_stem_code(&entry.icd11) {
        issues.warning(
            entry.id.as_str(),
            IssueCategory::ContentQuality,
            format!("ICD-11 code '{}' is not a valid stem code", entry.icd11),
        );
    }
}

fn check_topic(topic: &EducationalContent, library: &Library, issues: &mut Issues) {
    let id = topic.id.as_str();

    issues.placeholders(id, "name", topic.name.as_str());
    match topic.localized_name.as_deref() {
        Some(name) if !name.trim().is_empty() => issues.placeholders(id, "localized_name", name),
        _ => issues.warning(id, IssueCategory::ContentQuality, "missing localized name".into()),
    }

    check_levels(topic, issues);
    check_cross_references(topic, library, issues);
    check_metadata(topic, issues);
}

fn check_levels(topic: &EducationalContent, issues: &mut Issues) {
    let id = topic.id.as_str();

    for n in EducationalContent::MIN_LEVEL..=EducationalContent::MAX_LEVEL {
        let Some(level) = topic.level(n) else {
            issues.error(
                id,
                IssueCategory::InterfaceCompliance,
                format!("missing level {n}"),
            );
            continue;
        };

        if level.summary.trim().is_empty() {
            issues.error(id, IssueCategory::LevelContent, format!("level {n}: summary is empty"));
        }
        if level.explanation.trim().is_empty() {
            issues.error(
                id,
                IssueCategory::LevelContent,
                format!("level {n}: explanation is empty"),
            );
        }
        if level.key_terms.is_empty() {
            issues.warning(id, IssueCategory::LevelContent, format!("level {n}: no key terms"));
        }
        for (i, key_term) in level.key_terms.iter().enumerate() {
            if key_term.term.trim().is_empty() || key_term.definition.trim().is_empty() {
                issues.error(
                    id,
                    IssueCategory::LevelContent,
                    format!("level {n}: key term {} has an empty term or definition", i + 1),
                );
            }
            issues.placeholders(id, &format!("level {n} key term"), &key_term.term);
            issues.placeholders(id, &format!("level {n} key term definition"), &key_term.definition);
        }

        issues.placeholders(id, &format!("level {n} summary"), &level.summary);
        issues.placeholders(id, &format!("level {n} explanation"), &level.explanation);
        if let Some(notes) = level.clinical_notes.as_deref() {
            issues.placeholders(id, &format!("level {n} clinical notes"), notes);
        }
    }
}

fn check_cross_references(topic: &EducationalContent, library: &Library, issues: &mut Issues) {
    let id = topic.id.as_str();

    for (i, reference) in topic.cross_references.iter().enumerate() {
        let target = reference.target_id.trim();
        if target.is_empty() {
            issues.error(
                id,
                IssueCategory::CrossReferences,
                format!("cross-reference {} has an empty target id", i + 1),
            );
        } else if !library.contains_id(target) {
            issues.warning(
                id,
                IssueCategory::CrossReferences,
                format!("cross-reference target '{target}' is not loaded"),
            );
        }
    }
}

fn check_metadata(topic: &EducationalContent, issues: &mut Issues) {
    let id = topic.id.as_str();

    if topic.version < 1 {
        issues.error(
            id,
            IssueCategory::Metadata,
            format!("version must be at least 1, got {}", topic.version),
        );
    }

    for (field, value) in [("created_at", &topic.created_at), ("updated_at", &topic.updated_at)] {
        if !is_valid_date(value) {
            issues.error(
                id,
                IssueCategory::Metadata,
                format!("{field} '{value}' is not an RFC 3339 timestamp or YYYY-MM-DD date"),
            );
        }
    }

    if let Some(exam) = topic.tags.exam_relevance.as_ref() {
        if exam.shelf.iter().any(|shelf| shelf.trim().is_empty()) {
            issues.error(id, IssueCategory::Metadata, "empty shelf exam entry".into());
        }
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates.
fn is_valid_date(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

const PLACEHOLDER_WORDS: [&str; 3] = ["todo", "fixme", "placeholder"];

/// The first placeholder word found as a whole word, ignoring case.
fn find_placeholder(text: &str) -> Option<&'static str> {
    let lower = text.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';

    PLACEHOLDER_WORDS.into_iter().find(|word| {
        lower.match_indices(word).any(|(start, _)| {
            let end = start + word.len();
            let before_ok = start == 0 || !is_word(bytes[start - 1]);
            let after_ok = end == bytes.len() || !is_word(bytes[end]);
            before_ok && after_ok
        })
    })
}

/// ICD-11 stem code: `[0-9A-Z][A-Z][0-9][0-9A-Z]` with an optional `.` and one or two
/// alphanumeric extension characters, e.g. `8B11`, `8A01.10`, `8A06.Y`.
fn is_icd11_stem_code(code: &str) -> bool {
    let (stem, extension) = match code.split_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (code, None),
    };

    let stem_ok = matches!(
        stem.as_bytes(),
        [a, b, c, d]
            if (a.is_ascii_digit() || a.is_ascii_uppercase())
                && b.is_ascii_uppercase()
                && c.is_ascii_digit()
                && (d.is_ascii_digit() || d.is_ascii_uppercase())
    );

    let extension_ok = match extension {
        None => true,
        Some(ext) => {
            (1..=2).contains(&ext.len())
                && ext
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        }
    };

    stem_ok && extension_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HEMATOLOGY: &str = "specialty: hematology\nentries: []\n";

    fn neurology_with_code(code: &str) -> String {
        format!(
            r#"specialty: neurology
entries:
  - id: migraine
    name: Migraine
    localized_name: Migrana
    category: headache
    icd11: "{code}"
    summary: Recurrent headache disorder.
    pathophysiology: Trigeminovascular activation.
    prognosis: Episodic.
    patient_explanation: Keep a diary.
"#
        )
    }

    const TOPIC: &str = r#"topics:
  - id: platelet-function
    content_type: concept
    name: Platelet Function
    levels:
      - level: 1
        summary: TODO write this
        explanation: Platelets plug holes in vessels.
        key_terms:
          - term: Platelet
            definition: ""
      - level: 2
        summary: Adhesion, activation, aggregation.
        explanation: ""
    cross_references:
      - target_id: itp
        target_type: condition
        relationship: related
      - target_id: hematology-mds
        target_type: condition
        relationship: related
      - target_id: ""
        target_type: concept
        relationship: see-also
    tags:
      exam_relevance:
        shelf: ["  "]
    created_at: '2025-01-30T00:00:00.000Z'
    updated_at: 'last tuesday'
    version: 0
    status: draft
"#;

    fn library(neurology: &str, topics: &str) -> Library {
        let hematology = HEMATOLOGY.replace(
            "entries: []",
            r#"entries:
  - id: itp
    name: Immune Thrombocytopenia
    localized_name: Trombocitopenia inmune
    category: platelet
    summary: Autoimmune destruction of platelets.
    pathophysiology: p
    treatment: t
    prognosis: p
    patient_tip: t"#,
        );
        Library::from_documents(
            &hematology,
            neurology,
            &[(PathBuf::from("topics/test.yaml"), topics.to_owned())],
        )
        .expect("library")
    }

    fn messages(issues: &[ValidationIssue], severity: Severity) -> Vec<&str> {
        issues
            .iter()
            .filter(|i| i.severity == severity)
            .map(|i| i.message.as_str())
            .collect()
    }

    #[test]
    fn embedded_content_has_no_errors() {
        let library = Library::embedded().expect("library");
        let issues = validate_library(library);
        let errors: Vec<String> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(ToString::to_string)
            .collect();
        assert!(errors.is_empty(), "{errors:#?}");
        assert!(!has_errors(&issues));
    }

    #[test]
    fn embedded_content_reports_unresolved_cross_references_as_warnings() {
        let library = Library::embedded().expect("library");
        let issues = validate_library(library);
        assert!(issues.iter().any(|i| {
            i.category == IssueCategory::CrossReferences
                && i.severity == Severity::Warning
                && i.message.contains("hematology-mds")
        }));
    }

    #[test]
    fn flags_incomplete_topic() {
        let library = library(&neurology_with_code("8A80.1"), TOPIC);
        let issues = validate_library(&library);
        let errors = messages(&issues, Severity::Error);

        for expected in ["missing level 3", "missing level 4", "missing level 5"] {
            assert!(errors.contains(&expected), "{expected} not in {errors:#?}");
        }
        assert!(errors.contains(&"level 2: explanation is empty"));
        assert!(errors.contains(&"level 1: key term 1 has an empty term or definition"));
        assert!(errors.contains(&"level 1 summary contains placeholder text 'todo'"));
        assert!(errors.contains(&"cross-reference 3 has an empty target id"));
        assert!(errors.contains(&"version must be at least 1, got 0"));
        assert!(errors.contains(&"empty shelf exam entry"));
        assert!(errors
            .iter()
            .any(|m| m.starts_with("updated_at 'last tuesday'")));
        assert!(!errors.iter().any(|m| m.starts_with("created_at")));
        assert!(has_errors(&issues));
    }

    #[test]
    fn flags_topic_warnings() {
        let library = library(&neurology_with_code("8A80.1"), TOPIC);
        let issues = validate_library(&library);
        let warnings = messages(&issues, Severity::Warning);

        assert!(warnings.contains(&"missing localized name"));
        assert!(warnings.contains(&"level 2: no key terms"));
        assert!(warnings.contains(&"cross-reference target 'hematology-mds' is not loaded"));
        assert!(!warnings.iter().any(|m| m.contains("'itp'")));
    }

    #[test]
    fn flags_malformed_icd11_code() {
        let library = library(&neurology_with_code("G43.9"), TOPIC);
        let issues = validate_library(&library);
        assert!(issues.iter().any(|i| {
            i.record_id == "migraine"
                && i.severity == Severity::Warning
                && i.message.contains("G43.9")
        }));
    }

    #[test]
    fn icd11_stem_code_shapes() {
        for ok in ["8B11", "8A01.10", "8A06.Y", "2D6Z", "LA80.0", "8A6Y"] {
            assert!(is_icd11_stem_code(ok), "{ok}");
        }
        for bad in ["", "8B1", "8b11", "G43.9", "8B11.", "8B11.123", "8B11-0", "88B1"] {
            assert!(!is_icd11_stem_code(bad), "{bad}");
        }
    }

    #[test]
    fn placeholders_match_whole_words_only() {
        assert_eq!(find_placeholder("TODO: fill in"), Some("todo"));
        assert_eq!(find_placeholder("see (fixme)"), Some("fixme"));
        assert_eq!(find_placeholder("A Placeholder value"), Some("placeholder"));
        assert_eq!(find_placeholder("todos and mastodon"), None);
        assert_eq!(find_placeholder("placeholders"), None);
    }

    #[test]
    fn dates_accept_rfc3339_and_plain_dates() {
        assert!(is_valid_date("2025-01-30T00:00:00.000Z"));
        assert!(is_valid_date("2025-01-30"));
        assert!(!is_valid_date("2025-13-01"));
        assert!(!is_valid_date("30/01/2025"));
    }
}
