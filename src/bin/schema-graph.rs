//! Schema Graph CLI
//!
//! Command-line interface for generating schema graphs from extracted models.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schema_graph::{
    check_model, generate, load_config, load_json_auto, parse_model, validate_model,
    GeneratorConfig, Severity, ValidateError,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-graph")]
#[command(about = "Generate schema graphs from extracted object models")]
#[command(version)]
struct Cli {
    /// Log resolution details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the schema graph for an extracted model
    Generate {
        /// Model source: file path or URL (http:// or https://)
        model: String,

        /// Generator configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Seed the root package with a placeholder class of this name
        #[arg(long, value_name = "NAME")]
        dummy_class: Option<String>,

        /// Skip validating the model against the input format
        #[arg(long)]
        skip_validation: bool,
    },

    /// Validate a model file against the input format
    Validate {
        /// Model source: file path or URL
        model: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Check a model for inheritance cycles, duplicate names, and other problems
    Check {
        /// Model source: file path or URL
        model: String,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Only show errors
        #[arg(long, short)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            model,
            config,
            output,
            pretty,
            dummy_class,
            skip_validation,
        } => run_generate(GenerateArgs {
            model,
            config,
            output,
            pretty,
            dummy_class,
            skip_validation,
        }),

        Commands::Validate { model, json } => run_validate(&model, json),

        Commands::Check {
            model,
            format,
            strict,
            quiet,
        } => run_check(&model, &format, strict, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct GenerateArgs {
    model: String,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    dummy_class: Option<String>,
    skip_validation: bool,
}

fn run_generate(args: GenerateArgs) -> Result<(), u8> {
    let GenerateArgs {
        model: model_source,
        config: config_path,
        output,
        pretty,
        dummy_class,
        skip_validation,
    } = args;

    let mut config = match &config_path {
        Some(path) => load_config(path).map_err(|e| {
            eprintln!("Error loading config: {}", e);
            e.exit_code() as u8
        })?,
        None => GeneratorConfig::default(),
    };
    if let Some(name) = dummy_class {
        config = config.dummy_class(name);
    }

    let raw = load_json_auto(&model_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if !skip_validation {
        if let Err(e) = validate_model(&raw) {
            report_invalid(&e);
            return Err(e.exit_code() as u8);
        }
    }

    let model = parse_model(raw).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let graph = generate(&model, &config).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&graph)
    } else {
        serde_json::to_string(&graph)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn report_invalid(error: &ValidateError) {
    match error {
        ValidateError::Invalid { errors } => {
            eprintln!("Invalid model:");
            for error in errors {
                eprintln!("  {}", error);
            }
        }
        other => eprintln!("Error: {}", other),
    }
}

fn run_validate(model_source: &str, json_output: bool) -> Result<(), u8> {
    let raw = load_json_auto(model_source).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    match validate_model(&raw) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(ValidateError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Validation failed:");
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            Err(1)
        }
        Err(e) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}

fn run_check(model_source: &str, format: &str, strict: bool, quiet: bool) -> Result<(), u8> {
    let model = load_json_auto(model_source)
        .and_then(parse_model)
        .map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;

    let result = check_model(&model);
    let passed = result.is_ok() && (!strict || result.warnings == 0);

    if format == "json" {
        let output = serde_json::to_string_pretty(&result).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?;
        println!("{}", output);
    } else {
        if !quiet {
            println!("Checking {} ...\n", result.project);
        }

        for diag in &result.diagnostics {
            let (color, label) = match diag.severity {
                Severity::Error => ("\x1b[31m", "error"),
                Severity::Warning => ("\x1b[33m", "warning"),
            };
            if !quiet || diag.severity == Severity::Error {
                println!(
                    "  {}{}[{}]\x1b[0m: {} - {}",
                    color, label, diag.code, diag.path, diag.message
                );
            }
        }

        println!();
        if passed {
            println!(
                "\x1b[32m✓ {} types checked, all passed\x1b[0m",
                result.types_checked
            );
        } else {
            println!(
                "\x1b[31m✗ {} types checked: {} errors, {} warnings\x1b[0m",
                result.types_checked, result.errors, result.warnings
            );
        }
    }

    if passed {
        Ok(())
    } else {
        Err(1)
    }
}
