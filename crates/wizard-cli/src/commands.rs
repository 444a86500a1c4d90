use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use tokio::runtime::Runtime;
use tracing::{info, info_span};

use wizard_cli::summary::{issue_table, mapping_table, preview_table, records_table, summary_table};
use wizard_core::{ImportSummary, ImportWizard, WizardConfig};
use wizard_ingest::load_file;
use wizard_map::Record;
use wizard_model::{ColumnMapping, ExpectedColumn, TransformationTemplate, ValidationIssue};

use crate::cli::{ImportArgs, PreviewArgs};

/// Everything printed after an import.
pub struct ImportResult {
    pub summary: ImportSummary,
    pub columns: Vec<ExpectedColumn>,
    pub mappings: Vec<ColumnMapping>,
    pub header: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    /// Records shown on screen when nothing was written to disk.
    pub preview: Vec<Record>,
    pub max_issues: usize,
    pub has_errors: bool,
}

pub fn run_preview(args: &PreviewArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let parsed = runtime()?
        .block_on(load_file(&args.file, config.ingest.max_rows))
        .with_context(|| format!("load {}", args.file.display()))?;
    println!("File: {} ({} rows)", parsed.file_name, parsed.rows.len());
    println!("{}", preview_table(&parsed.rows, args.rows));
    Ok(())
}

pub fn run_import(args: &ImportArgs, config_path: Option<&Path>) -> Result<ImportResult> {
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let config = load_config(config_path)?;
    let columns: Vec<ExpectedColumn> = read_json(&args.columns).context("read expected columns")?;
    if columns.is_empty() {
        bail!("{} lists no expected columns", args.columns.display());
    }
    let mut wizard = ImportWizard::new(columns, config);

    // Stage 1: upload and header row
    runtime()?
        .block_on(wizard.upload_file(&args.file))
        .with_context(|| format!("load {}", args.file.display()))?;
    if let Some(row) = args.header_row {
        wizard.select_header_row(row).context("select header row")?;
    }
    wizard.go_next();

    // Stage 2: mappings, template first so explicit overrides win
    if let Some(path) = &args.template {
        let template: TransformationTemplate = read_json(path).context("read template")?;
        let id = wizard.import_template(template);
        wizard.apply_template(&id)?;
    }
    for mapping in &args.map {
        wizard
            .set_mapping(&mapping.field, mapping.source_index)
            .with_context(|| format!("--map {}", mapping.field))?;
    }
    for merge in &args.merge {
        wizard
            .set_additional_sources(&merge.field, &merge.indices)
            .with_context(|| format!("--merge {}", merge.field))?;
    }
    for transform in &args.transform {
        wizard
            .set_transformation(&transform.field, transform.config.clone())
            .with_context(|| format!("--transform {}", transform.field))?;
    }

    // Stage 3: validation
    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::with_template(
        "{spinner} validating [{bar:40}] {pos:>3}%",
    )?);
    wizard.run_validation_with(|progress| bar.set_position(u64::from(progress)))?;
    bar.finish_and_clear();

    // Stage 4: export
    let records = wizard.cleaned_export();
    let preview = match &args.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&records).context("serialize records")?;
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), records = records.len(), "records written");
            Vec::new()
        }
        None => records.into_iter().take(args.preview).collect(),
    };

    let summary = wizard.summary().context("no dataset loaded")?;
    Ok(ImportResult {
        summary,
        columns: wizard.columns().to_vec(),
        mappings: wizard.mappings().to_vec(),
        header: wizard.header().to_vec(),
        issues: wizard.issues().to_vec(),
        preview,
        max_issues: args.max_issues,
        has_errors: wizard.has_blocking_errors(),
    })
}

pub fn print_import(result: &ImportResult) {
    println!("{}", summary_table(&result.summary));
    println!();
    println!("Mappings:");
    println!(
        "{}",
        mapping_table(&result.columns, &result.mappings, &result.header)
    );
    if !result.issues.is_empty() {
        println!();
        println!("Issues:");
        println!("{}", issue_table(&result.issues, result.max_issues));
    }
    if !result.preview.is_empty() {
        println!();
        println!("Preview:");
        println!("{}", records_table(&result.preview));
    }
}

fn load_config(path: Option<&Path>) -> Result<WizardConfig> {
    match path {
        Some(path) => Ok(WizardConfig::load(path)?),
        None => Ok(WizardConfig::load_default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .context("start async runtime")
}
