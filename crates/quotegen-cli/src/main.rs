//! quotegen CLI - Project Quotation Workbook Generator
//!
//! Command-line interface for creating quotation configurations and
//! generating the quotation workbook from them.

mod diagnostics;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use quotegen_core::{
    ArchitectureTemplate, Diagnostic, DiagnosticEmitter, Estimator, QuotationConfig, Renderer,
    CATALOG, DEFAULT_ARCHITECTURE, DEFAULT_BASELINES,
};
use quotegen_engine::DeliveryCurveEstimator;
use quotegen_render::{
    default_output_name, file_stem, Generation, Generator, PreviewRenderer, WorkbookRenderer,
};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::diagnostics::{DiagnosticConfig, ExitCode, JsonEmitter, TerminalEmitter};

#[derive(Parser)]
#[command(name = "quotegen")]
#[command(author, version, about = "Project quotation workbook generator", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default quotation configuration
    Init {
        /// Project name
        #[arg(value_name = "NAME", default_value = "my-project")]
        name: String,

        /// Directory to create the file in
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Configuration file format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ConfigFileFormat,

        /// Architecture template key
        #[arg(short, long, default_value = DEFAULT_ARCHITECTURE)]
        architecture: String,

        /// Number of baselines (2-5)
        #[arg(short, long, default_value_t = DEFAULT_BASELINES)]
        baselines: usize,
    },

    /// List the architecture templates
    Catalog {
        /// Also list each template's work items
        #[arg(long)]
        items: bool,
    },

    /// Show what a workbook would be generated from
    Preview {
        /// Configuration file (.json or .toml)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Currency symbol
        #[arg(long, default_value = "€")]
        currency: String,
    },

    /// Generate the quotation workbook
    Generate {
        /// Configuration file (.json or .toml)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (default: Quotation_<project>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Currency symbol
        #[arg(long, default_value = "€")]
        currency: String,

        /// Date printed on the workbook (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Offer validity in days
        #[arg(long, default_value_t = 30)]
        validity: u32,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Only show errors
        #[arg(short, long)]
        quiet: bool,

        /// Output format for the summary and diagnostics
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConfigFileFormat {
    Json,
    Toml,
}

impl ConfigFileFormat {
    fn extension(self) -> &'static str {
        match self {
            ConfigFileFormat::Json => "json",
            ConfigFileFormat::Toml => "toml",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<process::ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let exit = match cli.command {
        Some(Commands::Init {
            name,
            output,
            format,
            architecture,
            baselines,
        }) => cmd_init(&name, &output, format, &architecture, baselines)?,
        Some(Commands::Catalog { items }) => cmd_catalog(items),
        Some(Commands::Preview { file, currency }) => cmd_preview(&file, &currency)?,
        Some(Commands::Generate {
            file,
            output,
            currency,
            date,
            validity,
            strict,
            quiet,
            format,
        }) => {
            let mut renderer = WorkbookRenderer::new()
                .currency(currency)
                .offer_validity_days(validity);
            if let Some(date) = date {
                renderer = renderer.generated_on(date);
            }
            let policy = DiagnosticConfig { strict, quiet };
            cmd_generate(&file, output, renderer, policy, format)?
        }
        None => {
            println!("quotegen - Project Quotation Workbook Generator");
            println!("Run with --help for usage information");
            ExitCode::Success
        }
    };

    Ok(exit.into())
}

// ============================================================================
// init
// ============================================================================

fn cmd_init(
    name: &str,
    dir: &Path,
    format: ConfigFileFormat,
    architecture: &str,
    baselines: usize,
) -> Result<ExitCode> {
    let path = dir.join(format!("{}.{}", file_stem(name), format.extension()));
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let mut config = QuotationConfig::new(name);
    config
        .set_architecture(architecture)
        .with_context(|| format!("cannot create '{name}'"))?;
    config.set_baseline_count(baselines);
    config
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "created configuration");
    println!("Created: {}", path.display());
    println!(
        "  {} baselines, {} ({} items)",
        config.baselines.len(),
        config.architecture.display_name,
        config.items().len()
    );
    Ok(ExitCode::Success)
}

// ============================================================================
// catalog
// ============================================================================

fn cmd_catalog(items: bool) -> ExitCode {
    for template in CATALOG.iter() {
        let marker = if template.key == DEFAULT_ARCHITECTURE {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<14} {} - {} items{}",
            template.key,
            template.display_name,
            template.item_count(),
            marker
        );
        println!("{:<14} {}", "", template.description);
        if items {
            print_items(template);
        }
    }
    ExitCode::Success
}

fn print_items(template: &ArchitectureTemplate) {
    for (i, item) in template.items.iter().enumerate() {
        println!("{:<14}   {:>2}. {}", "", i + 1, item);
    }
}

// ============================================================================
// preview
// ============================================================================

fn load(file: &Path) -> Result<(QuotationConfig, Vec<Diagnostic>)> {
    let loaded = QuotationConfig::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    debug!(path = %file.display(), repairs = loaded.1.len(), "loaded configuration");
    Ok(loaded)
}

fn cmd_preview(file: &Path, currency: &str) -> Result<ExitCode> {
    let (config, load_diagnostics) = load(file)?;

    let mut emitter = TerminalEmitter::new(std::io::stderr(), DiagnosticConfig::default());
    for d in load_diagnostics {
        emitter.emit(d);
    }

    let estimate = DeliveryCurveEstimator::new().estimate(&config);
    let text = PreviewRenderer::new()
        .currency(currency)
        .render(&config, &estimate)
        .context("failed to render preview")?;
    print!("{text}");
    Ok(emitter.exit_code())
}

// ============================================================================
// generate
// ============================================================================

fn cmd_generate(
    file: &Path,
    output: Option<PathBuf>,
    renderer: WorkbookRenderer,
    policy: DiagnosticConfig,
    format: OutputFormat,
) -> Result<ExitCode> {
    let (config, load_diagnostics) = load(file)?;
    let currency = renderer.currency.clone();

    let generator = Generator::with_renderer(renderer);
    let generation = generator
        .generate(&config)
        .with_context(|| format!("cannot generate a quotation from {}", file.display()))?;

    let output = output.unwrap_or_else(|| default_output_name(&config.project_name));
    generator
        .save(&generation.document, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let diagnostics = load_diagnostics
        .into_iter()
        .chain(generation.diagnostics.iter().cloned());

    match format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::new(std::io::stderr(), policy);
            for d in diagnostics {
                emitter.emit(d);
            }
            println!("Generated: {}", output.display());
            for line in summary_lines(&config, &generation, &currency) {
                println!("  {line}");
            }
            Ok(emitter.exit_code())
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(policy);
            for d in diagnostics {
                emitter.emit(d);
            }
            let report = json!({
                "project": config.project_name,
                "output": output.display().to_string(),
                "sheets": generation.document.sheet_names(),
                "baselines": config
                    .baselines
                    .iter()
                    .zip(&generation.estimate.baselines)
                    .map(|(baseline, figures)| json!({
                        "name": baseline.name,
                        "periods": baseline.period_count,
                        "effort_days": figures.summary.effort_days,
                        "cost": figures.summary.cost,
                        "detailed_effort_days": figures.rollup.total_effort,
                        "detailed_cost": figures.rollup.total_cost,
                        "margin_percent": figures.pricing.margin_percent,
                        "final_price": figures.pricing.final_price.round_dp(2).normalize().to_string(),
                    }))
                    .collect::<Vec<_>>(),
                "diagnostics": emitter.to_json_value(),
            });
            let text = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{text}");
            Ok(emitter.exit_code())
        }
    }
}

fn summary_lines(config: &QuotationConfig, generation: &Generation, currency: &str) -> Vec<String> {
    config
        .baselines
        .iter()
        .zip(&generation.estimate.baselines)
        .map(|(baseline, figures)| {
            format!(
                "{}: {} quarters, {} days, {}{} + {}% = {}{}",
                baseline.name,
                baseline.period_count,
                figures.summary.effort_days,
                currency,
                figures.summary.cost,
                figures.pricing.margin_percent,
                currency,
                figures.pricing.final_price.round_dp(2).normalize()
            )
        })
        .collect()
}
