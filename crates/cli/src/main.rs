use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use catalog_core::{
    has_errors, validate_library, CoreConfig, EducationalContent, EntryRef, Library,
    LevelContent, Vocabulary,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Medical content catalog CLI")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Content directory to load instead of the built-in content (defaults to CATALOG_CONTENT_DIR)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one entry
    Get {
        /// hematology or neurology
        specialty: String,
        /// Entry id, e.g. itp
        id: String,
    },
    /// Case-insensitive search over names, summaries and findings
    Search {
        /// hematology or neurology
        specialty: String,
        /// Text to look for (empty lists everything)
        query: String,
    },
    /// List the entries in one category
    Category {
        /// hematology or neurology
        specialty: String,
        /// Category, e.g. platelet
        category: String,
    },
    /// Count the entries of a specialty
    Count {
        /// hematology or neurology
        specialty: String,
    },
    /// Show an educational topic
    Topic {
        /// Topic id
        id: String,
        /// Only show this level (1 patient to 5 specialist)
        #[arg(long)]
        level: Option<u8>,
    },
    /// Check every record and report content issues
    Validate,
    /// Record counts per catalog
    Summary,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'catalog --help' for commands");
        return Ok(());
    };

    let content_dir = cli.content_dir.or_else(|| {
        catalog_core::config::content_dir_from_env_value(std::env::var("CATALOG_CONTENT_DIR").ok())
    });
    let library = Library::load(&CoreConfig::new(content_dir)?)?;

    let stdout = std::io::stdout();
    run(&library, command, cli.json, &mut stdout.lock())
}

fn run(library: &Library, command: Commands, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Get { specialty, id } => {
            let entry = library.specialty_named(&specialty)?.require(&id)?;
            if json {
                write_json(out, &entry)?;
            } else {
                write_entry(out, &entry)?;
            }
        }
        Commands::Search { specialty, query } => {
            let entries = library.specialty_named(&specialty)?.search(&query);
            write_entries(out, &entries, json)?;
        }
        Commands::Category { specialty, category } => {
            let entries = library.specialty_named(&specialty)?.by_category(&category)?;
            write_entries(out, &entries, json)?;
        }
        Commands::Count { specialty } => {
            let count = library.specialty_named(&specialty)?.count();
            if json {
                write_json(out, &serde_json::json!({ "count": count }))?;
            } else {
                writeln!(out, "{count}")?;
            }
        }
        Commands::Topic { id, level } => match level {
            Some(n) => {
                let level = library.level(&id, n)?;
                if json {
                    write_json(out, level)?;
                } else {
                    write_level(out, level)?;
                }
            }
            None => {
                let topic = library.topics().require(&id)?;
                if json {
                    write_json(out, topic)?;
                } else {
                    write_topic(out, library, topic)?;
                }
            }
        },
        Commands::Validate => {
            let issues = validate_library(library);
            if json {
                write_json(out, &issues)?;
            } else if issues.is_empty() {
                writeln!(out, "No issues found.")?;
            } else {
                for issue in &issues {
                    writeln!(out, "{issue}")?;
                }
            }
            if has_errors(&issues) {
                anyhow::bail!("content validation failed");
            }
        }
        Commands::Summary => {
            let summary = library.summary();
            if json {
                write_json(out, &summary)?;
            } else {
                writeln!(out, "hematology: {}", summary.hematology)?;
                writeln!(out, "neurology:  {}", summary.neurology)?;
                writeln!(out, "topics:     {}", summary.topics)?;
                writeln!(out, "total:      {}", summary.total())?;
            }
        }
    }

    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    writeln!(out, "{text}")?;
    Ok(())
}

fn write_entries(out: &mut impl Write, entries: &[EntryRef<'_>], json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, &entries);
    }
    if entries.is_empty() {
        writeln!(out, "No entries found.")?;
    }
    for entry in entries {
        writeln!(out, "{:<32} {:<14} {}", entry.id(), entry.category(), entry.name())?;
    }
    Ok(())
}

fn write_entry(out: &mut impl Write, entry: &EntryRef<'_>) -> anyhow::Result<()> {
    writeln!(out, "{} ({})", entry.name(), entry.id())?;
    writeln!(out, "Specialty: {}", entry.specialty().as_str())?;
    writeln!(out, "Category:  {}", entry.category())?;
    match entry {
        EntryRef::Hematology(e) => {
            writeln!(out, "Localized: {}", e.localized_name)?;
            writeln!(out, "\n{}", e.summary)?;
            write_list(out, "Clinical features", &e.clinical_features)?;
            write_list(out, "Lab findings", &e.lab_findings)?;
            write_list(out, "Diagnostic workup", &e.diagnostic_workup)?;
            writeln!(out, "\nTreatment:\n  {}", e.treatment)?;
            write_list(out, "Monitoring", &e.monitoring)?;
            write_list(out, "Complications", &e.complications)?;
            writeln!(out, "\nPrognosis:\n  {}", e.prognosis)?;
            writeln!(out, "\nFor patients:\n  {}", e.patient_tip)?;
        }
        EntryRef::Neurology(e) => {
            writeln!(out, "Localized: {}", e.localized_name)?;
            if !e.icd11.is_empty() {
                writeln!(out, "ICD-11:    {}", e.icd11)?;
            }
            writeln!(out, "\n{}", e.summary)?;
            write_list(out, "Clinical features", &e.clinical_features)?;
            write_list(out, "Diagnostics", &e.diagnostics)?;
            write_list(out, "Treatment", &e.treatment)?;
            write_list(out, "Emergency signs", &e.emergency_signs)?;
            writeln!(out, "\nPrognosis:\n  {}", e.prognosis)?;
            writeln!(out, "\nFor patients:\n  {}", e.patient_explanation)?;
        }
    }
    Ok(())
}

fn write_list(out: &mut impl Write, heading: &str, items: &[String]) -> std::io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{heading}:")?;
    for item in items {
        writeln!(out, "  - {item}")?;
    }
    Ok(())
}

fn write_topic(
    out: &mut impl Write,
    library: &Library,
    topic: &EducationalContent,
) -> anyhow::Result<()> {
    writeln!(out, "{} ({})", topic.name, topic.id)?;
    writeln!(
        out,
        "Type: {}  Status: {}  Version: {}",
        topic.content_type.as_str(),
        topic.status.as_str(),
        topic.version
    )?;
    if !topic.alternate_names.is_empty() {
        writeln!(out, "Also known as: {}", topic.alternate_names.join(", "))?;
    }
    for level in &topic.levels {
        writeln!(out, "\nLevel {}: {}", level.level, level.summary)?;
    }

    let references = library.resolve_cross_references(topic.id.as_str())?;
    if !references.is_empty() {
        writeln!(out, "\nSee also:")?;
        for resolved in references {
            let reference = resolved.reference;
            match resolved.target {
                Some(target) => writeln!(
                    out,
                    "  - {} ({}, {})",
                    target.name(),
                    target.id(),
                    target.catalog()
                )?,
                None => writeln!(out, "  - {} (not loaded)", reference.target_id)?,
            }
        }
    }
    Ok(())
}

fn write_level(out: &mut impl Write, level: &LevelContent) -> anyhow::Result<()> {
    writeln!(out, "Level {}: {}", level.level, level.summary)?;
    writeln!(out, "\n{}", level.explanation)?;
    if !level.key_terms.is_empty() {
        writeln!(out, "\nKey terms:")?;
        for term in &level.key_terms {
            writeln!(out, "  - {}: {}", term.term, term.definition)?;
        }
    }
    write_list(out, "Analogies", &level.analogies)?;
    write_list(out, "Examples", &level.examples)?;
    if let Some(notes) = &level.clinical_notes {
        writeln!(out, "\nClinical notes:\n  {notes}")?;
    }
    write_list(out, "Counseling points", &level.patient_counseling_points)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (anyhow::Result<()>, String) {
        let cli = Cli::try_parse_from(std::iter::once("catalog").chain(args.iter().copied()))
            .expect("arguments");
        let library = Library::from_embedded_content().expect("library");
        let mut out = Vec::new();
        let result = run(&library, cli.command.expect("command"), cli.json, &mut out);
        (result, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn get_prints_entry() {
        let (result, out) = run_args(&["get", "hematology", "itp"]);
        assert!(result.is_ok());
        assert!(out.starts_with("Immune Thrombocytopenia (ITP) (itp)"));
    }

    #[test]
    fn get_missing_entry_fails() {
        let (result, _) = run_args(&["get", "hematology", "nonexistent-id"]);
        assert!(result.is_err());
    }

    #[test]
    fn category_json_lists_ids() {
        let (result, out) = run_args(&["--json", "category", "hematology", "platelet"]);
        assert!(result.is_ok());
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        let ids: Vec<&str> = value
            .as_array()
            .expect("array")
            .iter()
            .map(|e| e["id"].as_str().expect("id"))
            .collect();
        assert_eq!(ids, vec!["itp", "ttp", "thrombocytosis"]);
    }

    #[test]
    fn count_and_summary() {
        let (_, count) = run_args(&["count", "neurology"]);
        assert_eq!(count.trim(), "51");

        let (_, summary) = run_args(&["summary", "--json"]);
        let value: serde_json::Value = serde_json::from_str(&summary).expect("json");
        assert_eq!(value["hematology"], 25);
        assert_eq!(value["topics"], 4);
    }

    #[test]
    fn topic_level_out_of_range_fails() {
        let (result, _) = run_args(&[
            "topic",
            "hematology-iron-deficiency-anemia-comprehensive",
            "--level",
            "6",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn topic_marks_unloaded_references() {
        let (result, out) = run_args(&["topic", "hematology-b12-folate-deficiency-comprehensive"]);
        assert!(result.is_ok());
        assert!(out.contains("hematology-mds (not loaded)"));
    }
}
