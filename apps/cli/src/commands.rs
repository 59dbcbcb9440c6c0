//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use docsmith_core::pipeline::{ProgressReporter, RunConfig, RunStats};
use docsmith_genai::{GenAiClient, GenAiConfig};
use docsmith_shared::{AppConfig, DocProfile, init_config, load_config, resolve_api_key};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Docsmith — turn element metadata into drafted documentation.
#[derive(Parser)]
#[command(
    name = "docsmith",
    version,
    about = "Generate templated element documentation from structured metadata via a generation service.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate documentation for every element in a metadata file.
    Generate {
        /// Metadata file (.csv, .xml, .rdf, .ttl, .turtle).
        data_file: PathBuf,

        /// Reference document uploaded to the generation service.
        reference_doc: PathBuf,

        /// Output directory (defaults to the configured output_dir).
        output_dir: Option<PathBuf>,

        /// Documentation profile: element or ses.
        #[arg(short, long)]
        profile: Option<String>,

        /// Model identifier override.
        #[arg(short, long)]
        model: Option<String>,

        /// Delay between elements in ms (external rate-limit courtesy).
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Parse and classify a metadata file without calling the service.
    Inspect {
        /// Metadata file (.csv, .xml, .rdf, .ttl, .turtle).
        data_file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docsmith=info",
        1 => "docsmith=debug",
        _ => "docsmith=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            data_file,
            reference_doc,
            output_dir,
            profile,
            model,
            delay_ms,
        } => {
            cmd_generate(
                &data_file,
                &reference_doc,
                output_dir,
                profile.as_deref(),
                model.as_deref(),
                delay_ms,
            )
            .await
        }
        Command::Inspect { data_file } => cmd_inspect(&data_file).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

async fn cmd_generate(
    data_file: &PathBuf,
    reference_doc: &PathBuf,
    output_dir: Option<PathBuf>,
    profile: Option<&str>,
    model: Option<&str>,
    delay_ms: Option<u64>,
) -> Result<()> {
    // Resolve credentials before doing anything
    let mut config = load_config()?;
    let api_key = resolve_api_key(&config)?;

    if let Some(model) = model {
        config.genai.model = model.to_string();
    }

    let profile: DocProfile = profile
        .unwrap_or(config.defaults.profile.as_str())
        .parse()
        .map_err(|e| eyre!("{e}"))?;

    let out_root = output_dir.unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));

    if !reference_doc.exists() {
        return Err(eyre!(
            "reference document not found: {}",
            reference_doc.display()
        ));
    }

    let elements = docsmith_parser::parse_file(data_file)?;
    if elements.is_empty() {
        return Err(eyre!(
            "no labeled elements found in '{}'",
            data_file.display()
        ));
    }

    let run_config = RunConfig {
        out_root: out_root.clone(),
        profile,
        element_delay: std::time::Duration::from_millis(
            delay_ms.unwrap_or(config.defaults.element_delay_ms),
        ),
    };

    let client = GenAiClient::new(GenAiConfig::from(&config), api_key)?;

    info!(
        data_file = %data_file.display(),
        reference = %reference_doc.display(),
        %profile,
        model = %config.genai.model,
        elements = elements.len(),
        "starting generation run"
    );

    // Set up progress reporting
    let reporter = CliProgress::new();

    let stats =
        docsmith_core::pipeline::run(&run_config, elements, reference_doc, &client, &reporter)
            .await?;

    // Print summary
    println!();
    println!("  Generation complete!");
    println!("  Profile:    {profile}");
    println!("  Generated:  {}", stats.generated);
    println!("  Skipped:    {}", stats.skipped);
    println!("  Failed:     {}", stats.failed());
    println!(
        "  Tokens:     {} in / {} out",
        stats.tokens_in, stats.tokens_out
    );
    println!("  Output:     {}", out_root.display());
    println!("  Time:       {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    if !stats.errors.is_empty() {
        println!("  Failed elements:");
        for (label, error) in &stats.errors {
            println!("    {label}: {error}");
        }
        println!();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("progress template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn element(&self, current: usize, total: usize, label: &str) {
        self.spinner
            .set_message(format!("Generating [{current}/{total}] {label}"));
    }

    fn done(&self, _stats: &RunStats) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

async fn cmd_inspect(data_file: &PathBuf) -> Result<()> {
    let elements = docsmith_parser::parse_file(data_file)?;

    println!();
    println!("  {:<8} {:<10} {}", "AREA", "ID", "LABEL");
    for element in &elements {
        let area = docsmith_core::classify(&element.label);
        let id = docsmith_render::derive_element_id(&element.uri, &element.label);
        println!("  {area:<8} {id:<10} {}", element.label);
    }
    println!();
    println!("  {} labeled element(s)", elements.len());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
