mod config;
mod gemini;
mod interactive;
mod report;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use sectiongen_core::resolver::parse_schema;
use sectiongen_core::{check_balance, Pipeline, Resolution, SchemaOrigin, SchemaSource};

use config::{GeneratorConfig, ServiceConfig};
use gemini::{GeminiClient, OfflineSource};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Page-section variant generator.
#[derive(Parser)]
#[command(
    name = "sectiongen",
    version,
    about = "Generate page-section variants and register them in a site builder"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one section variant from a description
    Generate {
        /// Free-text description of the section
        #[arg(required_unless_present = "schema")]
        prompt: Option<String>,
        /// Root of the site-builder project
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Configuration file (default: <root>/sectiongen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip the generative service and use the fallback schema
        #[arg(long)]
        offline: bool,
        /// Use a schema JSON file instead of the generative service
        #[arg(long, conflicts_with = "offline")]
        schema: Option<PathBuf>,
        /// Compute every change without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Prompt for descriptions until told to quit
    Interactive {
        /// Root of the site-builder project
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Configuration file (default: <root>/sectiongen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip the generative service and use the fallback schema
        #[arg(long)]
        offline: bool,
    },

    /// Check generated files for unbalanced braces and parentheses
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            prompt,
            root,
            config,
            offline,
            schema,
            dry_run,
        } => {
            cmd_generate(
                prompt.as_deref(),
                &root,
                config.as_deref(),
                offline,
                schema.as_deref(),
                dry_run,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Interactive {
            root,
            config,
            offline,
        } => {
            let config = load_or_exit(&root, config.as_deref(), cli.output, cli.quiet);
            let source = schema_source(&config.service, offline);
            interactive::run_interactive(&root, &config, source.as_ref(), cli.output, cli.quiet);
        }
        Commands::Check { files } => {
            cmd_check(&files, cli.output, cli.quiet);
        }
    }
}

// ── Subcommands ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    prompt: Option<&str>,
    root: &Path,
    config_path: Option<&Path>,
    offline: bool,
    schema_path: Option<&Path>,
    dry_run: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let config = load_or_exit(root, config_path, output, quiet);
    let pipeline = Pipeline::new(root, &config.section, &config.paths).dry_run(dry_run);

    let report = match schema_path {
        Some(path) => {
            let schema = match read_schema_file(path) {
                Ok(s) => s,
                Err(e) => {
                    report_error(&e, output, quiet);
                    process::exit(1);
                }
            };
            pipeline.apply(Resolution {
                schema,
                origin: SchemaOrigin::Supplied,
            })
        }
        None => {
            let source = schema_source(&config.service, offline);
            pipeline.run(
                source.as_ref(),
                prompt.unwrap_or_default(),
                &mut rand::thread_rng(),
            )
        }
    };

    report::print_run(&report, output, quiet);
    if !report.success() {
        process::exit(1);
    }
}

fn cmd_check(files: &[PathBuf], output: OutputFormat, quiet: bool) {
    let mut results = Vec::new();
    let mut unreadable = false;

    for path in files {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                report_error(
                    &format!("error: could not read '{}': {}", path.display(), e),
                    output,
                    quiet,
                );
                unreadable = true;
                continue;
            }
        };
        let balance = check_balance(&text);
        match output {
            OutputFormat::Json => results.push(report::check_to_json(path, &balance)),
            OutputFormat::Text => {
                if !quiet {
                    report::print_check_text(path, &balance);
                }
            }
        }
    }

    if output == OutputFormat::Json && !quiet {
        let json = serde_json::to_string_pretty(&serde_json::Value::Array(results))
            .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
        println!("{}", json);
    }

    if unreadable {
        process::exit(1);
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_or_exit(
    root: &Path,
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> GeneratorConfig {
    match config::load_config(root, config_path) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

fn schema_source(service: &ServiceConfig, offline: bool) -> Box<dyn SchemaSource> {
    if offline {
        log::info!("offline mode: the fallback schema will be used");
        Box::new(OfflineSource)
    } else {
        Box::new(GeminiClient::from_config(service))
    }
}

fn read_schema_file(path: &Path) -> Result<sectiongen_core::ComponentSchema, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("error: could not read schema '{}': {}", path.display(), e))?;
    parse_schema(&text).map_err(|e| format!("error: '{}': {}", path.display(), e))
}

/// Report an error message to stderr in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
