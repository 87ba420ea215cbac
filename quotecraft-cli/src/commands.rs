//! Subcommand implementations.
//!
//! Each command writes its report to `out` so callers (and tests) decide
//! where output goes.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use quotecraft_editor::{
    parse_script, CalculatorDocument, DocumentFormat, Editor, EditorConfig, FileSink, Result,
};
use quotecraft_fields::{derive_variable_name, diagnose, FieldDiagnostic};

/// Outcome of `quotecraft apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    pub commands: usize,
    pub changes: usize,
    pub fields: usize,
    pub saved: bool,
    pub problems: usize,
}

/// `quotecraft kinds`
pub fn run_kinds(config: &EditorConfig, out: &mut impl Write) -> Result<()> {
    for (kind, label) in config.kind_labels.palette() {
        writeln!(out, "{:<14}{}", kind.as_str(), label)?;
    }
    Ok(())
}

/// `quotecraft slug <LABEL>`
pub fn run_slug(label: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", derive_variable_name(label))?;
    Ok(())
}

/// `quotecraft apply <DOC> --script <SCRIPT> [--out <PATH>]`
pub async fn run_apply(
    doc: &Path,
    script: &Path,
    target: Option<&Path>,
    config: &EditorConfig,
    out: &mut impl Write,
) -> Result<ApplySummary> {
    let document = if doc.exists() {
        read_document(doc, config).await?
    } else {
        info!(path = %doc.display(), "starting a new calculator");
        new_document(doc)
    };
    let commands = parse_script(&tokio::fs::read_to_string(script).await?)?;

    let target = target.unwrap_or(doc);
    let sink = FileSink::new(target, format_for(target, config));
    let mut editor = Editor::open(document)
        .with_config(EditorConfig {
            autosave: true,
            ..config.clone()
        })
        .with_sink(Arc::new(sink))
        .build();

    let changes = editor.apply_all(&commands);
    debug!(commands = commands.len(), changes, "script replayed");
    let saved = editor.flush().await?;

    let problems = diagnose(editor.fields());
    report(&problems, out)?;
    writeln!(
        out,
        "applied {} commands ({} changes), {} fields{}",
        commands.len(),
        changes,
        editor.fields().len(),
        if saved {
            format!(", saved to {}", target.display())
        } else {
            String::new()
        }
    )?;

    Ok(ApplySummary {
        commands: commands.len(),
        changes,
        fields: editor.fields().len(),
        saved,
        problems: problems.len(),
    })
}

/// `quotecraft check <DOC>`. Returns the number of problems found.
pub async fn run_check(doc: &Path, config: &EditorConfig, out: &mut impl Write) -> Result<usize> {
    let document = read_document(doc, config).await?;
    let problems = diagnose(&document.fields);
    report(&problems, out)?;
    if problems.is_empty() {
        writeln!(out, "ok: {} fields", document.fields.len())?;
    }
    Ok(problems.len())
}

fn report(problems: &[FieldDiagnostic], out: &mut impl Write) -> Result<()> {
    for problem in problems {
        writeln!(out, "problem: {problem}")?;
    }
    Ok(())
}

/// The path's own format, or the configured one when the extension says nothing.
fn format_for(path: &Path, config: &EditorConfig) -> DocumentFormat {
    DocumentFormat::from_path(path).unwrap_or(config.document_format)
}

async fn read_document(path: &Path, config: &EditorConfig) -> Result<CalculatorDocument> {
    let text = tokio::fs::read_to_string(path).await?;
    CalculatorDocument::from_text(&text, format_for(path, config))
}

fn new_document(path: &Path) -> CalculatorDocument {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("calculator");
    CalculatorDocument::new(name, name)
}
