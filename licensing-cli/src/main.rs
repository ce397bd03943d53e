//! Command-line interface for licensing specifications
//! Parses extracted specification text into a section tree and matches business
//! profiles against it.
//!
//! Usage:
//!   licensing parse `<path>` [--format `<format>`] [--output `<file>`]
//!   licensing match `<path>` --area `<sqm>` --seats `<n>` [--gas] [--meat] [--delivery]
//!   licensing match `<path>` --profile `<profile.json>`
//!   licensing --list-formats
//!
//! `match` accepts either specification text or a forest saved with `--format json`.
//! Every command takes `--config <file>` to layer a TOML file over the built-in
//! defaults. Logging goes to stderr and is controlled by `LICENSING_LOG`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use licensing_config::{LicensingConfig, Loader};
use licensing_parser::licensing::ast::Forest;
use licensing_parser::licensing::formats::{
    forest_from_json, to_treeviz_str_with_params, FormatRegistry,
};
use licensing_parser::licensing::loader::DocumentLoader;
use licensing_parser::licensing::matching::{BusinessProfile, MatchReport, StructuralMatcher};
use licensing_parser::licensing::pipeline::SectionParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format (json, yaml, treeviz; default from config)")
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in defaults")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Write the result to this file instead of stdout")
}

fn show_bounds_arg() -> Arg {
    Arg::new("show-bounds")
        .long("show-bounds")
        .help("Append structured constraints to treeviz lines")
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("licensing")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse licensing specifications and match business profiles against them")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a specification into a section tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the extracted specification text")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg())
                .arg(output_arg())
                .arg(config_arg())
                .arg(show_bounds_arg()),
        )
        .subcommand(
            Command::new("match")
                .about("Keep only the sections that concern a business")
                .arg(
                    Arg::new("path")
                        .help("Specification text, or a forest saved as JSON")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("area")
                        .long("area")
                        .help("Business area in square meters")
                        .required_unless_present("profile")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("seats")
                        .long("seats")
                        .help("Number of seats")
                        .required_unless_present("profile")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("profile")
                        .long("profile")
                        .short('p')
                        .help("JSON file holding the business profile")
                        .conflicts_with_all(["area", "seats", "gas", "meat", "delivery"]),
                )
                .arg(
                    Arg::new("gas")
                        .long("gas")
                        .help("The business uses gas")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("meat")
                        .long("meat")
                        .help("The business serves meat")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("delivery")
                        .long("delivery")
                        .help("The business offers delivery")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg())
                .arg(output_arg())
                .arg(config_arg())
                .arg(show_bounds_arg()),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LICENSING_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();

    let result = if matches.get_flag("list-formats") {
        handle_list_formats_command();
        Ok(())
    } else {
        match matches.subcommand() {
            Some(("parse", sub)) => handle_parse_command(sub),
            Some(("match", sub)) => handle_match_command(sub),
            _ => {
                let _ = cli().print_help();
                Ok(())
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<LicensingConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("show-bounds") {
        loader = loader.set_override("output.show_bounds", true)?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.build().context("failed to load configuration")
}

fn parser_for(config: &LicensingConfig) -> Result<SectionParser> {
    SectionParser::from_spec(&config.vocabulary).context("invalid vocabulary configuration")
}

/// Text documents are parsed; a saved JSON forest is read back as-is.
fn read_forest(path: &str, parser: &SectionParser) -> Result<Forest> {
    let loader = DocumentLoader::from_path(path)?;
    let source = loader.source().trim_start();
    if source.starts_with('[') {
        debug!(path, "reading saved forest");
        return forest_from_json(source).with_context(|| format!("failed to read forest from {path}"));
    }
    Ok(loader.parse_with(parser))
}

fn read_profile(matches: &ArgMatches) -> Result<BusinessProfile> {
    if let Some(path) = matches.get_one::<String>("profile") {
        let source =
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        return serde_json::from_str(&source)
            .with_context(|| format!("invalid business profile in {path}"));
    }
    let area = *matches.get_one::<f64>("area").context("missing --area")?;
    let seats = *matches.get_one::<i64>("seats").context("missing --seats")?;
    BusinessProfile::new(
        area,
        seats,
        matches.get_flag("gas"),
        matches.get_flag("meat"),
        matches.get_flag("delivery"),
    )
    .context("invalid business profile")
}

fn emit(rendered: &str, output: Option<&String>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(Path::new(path), rendered).with_context(|| format!("failed to write {path}"))?;
            info!(path = %path, "wrote output");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn check_format(registry: &FormatRegistry, format: &str) -> Result<()> {
    if !registry.has(format) {
        bail!(
            "unknown format '{}' (available: {})",
            format,
            registry.list_formats().join(", ")
        );
    }
    Ok(())
}

fn treeviz_params(config: &LicensingConfig) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.insert("show-bounds".to_string(), config.output.show_bounds.to_string());
    params
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let parser = parser_for(&config)?;
    let path = matches
        .get_one::<String>("path")
        .context("missing input path")?;
    let registry = FormatRegistry::with_defaults();
    let format = config.output.format.as_str();
    check_format(&registry, format)?;

    let forest = DocumentLoader::from_path(path)?.parse_with(&parser);
    info!(path = %path, roots = forest.len(), "parsed specification");

    let rendered = if format == "treeviz" {
        to_treeviz_str_with_params(&forest, &treeviz_params(&config))
    } else {
        registry.serialize(&forest, format)?
    };
    emit(&rendered, matches.get_one::<String>("output"))
}

/// Handle the match command
fn handle_match_command(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let parser = parser_for(&config)?;
    let path = matches
        .get_one::<String>("path")
        .context("missing input path")?;
    let registry = FormatRegistry::with_defaults();
    let format = config.output.format.as_str();
    check_format(&registry, format)?;

    let profile = read_profile(matches)?;

    let forest = read_forest(path, &parser)?;
    let matcher = StructuralMatcher::with(parser.vocabulary().clone(), config.matching.clone());
    let report: MatchReport = matcher.report(&profile, &forest);
    info!(
        total = report.total_sections,
        matched = report.matched_sections,
        "matched profile"
    );

    let rendered = if format == "treeviz" {
        to_treeviz_str_with_params(&report.matched, &treeviz_params(&config))
    } else {
        registry.serialize_report(&report, format)?
    };
    emit(&rendered, matches.get_one::<String>("output"))
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for (name, description) in registry.describe_formats() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
