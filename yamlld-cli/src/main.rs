// Command-line interface for yamlld
//
// This binary provides commands for converting and inspecting YAML-LD files.
//
// The main role for the yamlld program is to move documents between YAML-LD and JSON-LD, going through the same
// internal representation the linked-data algorithms use. The core capabilities live in the yamlld-babel crate; this
// crate only wires them to files, flags and configuration.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension (or, failing that,
// from the content), while being overwrittable by an explicit --from flag.
// Usage:
//  yamlld <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  yamlld convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  yamlld inspect <path> [<transform>]      - Show the node tree or the loaded IR (defaults to "tree")
//  yamlld --list-formats                    - List available formats and transforms
//
// Profiles:
//
// --profile json|extended picks the capability profile for both reading and writing. It overrides the value from
// the configuration files (./yamlld.toml when present, then --config).
//
// Logging goes to stderr. It is quiet by default (warnings only); --verbose or RUST_LOG turn it up.

mod transforms;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command, ValueHint};
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use yamlld_babel::formats::json::JsonLdFormat;
use yamlld_babel::formats::yamlld::YamlLdFormat;
use yamlld_babel::{FormatRegistry, Options};
use yamlld_config::{Loader, YamlLdConfig};

const PROFILES: &[&str] = &["json", "extended"];

fn build_cli() -> Command {
    Command::new("yamlld")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting YAML-LD documents")
        .long_about(
            "yamlld reads and writes YAML-LD, the YAML serialization of JSON-LD.\n\n\
            Commands:\n  \
            - convert: Convert between YAML-LD and JSON-LD (default command)\n  \
            - inspect: Show the node tree or the loaded internal representation\n\n\
            Examples:\n  \
            yamlld doc.yamlld --to jsonld                  # Auto-detect source format\n  \
            yamlld doc.jsonld --to yamlld -o doc.yamlld    # Write to a file\n  \
            yamlld inspect doc.yamlld ir-json              # Show the loaded document",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a yamlld.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .global(true)
                .help("Capability profile: json or extended")
                .long_help(
                    "Capability profile used to read and write YAML-LD.\n\n\
                    json: no anchors/aliases, only core and XML Schema tags.\n\
                    extended: aliases are kept as shared structure and other tags\n\
                    become typed literals.",
                )
                .value_parser(PossibleValuesParser::new(PROFILES)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect a YAML-LD file")
                .long_about(
                    "Show one stage of reading a YAML-LD file.\n\n\
                    tree:    the node tree as written, with tags and anchors\n\
                    ir-json: the loaded document, as the linked-data algorithms see it\n\n\
                    Examples:\n  \
                    yamlld inspect doc.yamlld                   # Node tree\n  \
                    yamlld inspect doc.yamlld ir-json --profile extended",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the YAML-LD file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("What to show (defaults to 'tree')")
                        .value_parser(PossibleValuesParser::new(transforms::AVAILABLE_TRANSFORMS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("show-linum")
                        .long("show-linum")
                        .help("Prefix tree lines with their source line number")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert a document from one format to another.\n\n\
                    The source format is auto-detected from the file extension when\n\
                    --from is not given, and from the content when the extension is\n\
                    unknown.\n\n\
                    Examples:\n  \
                    yamlld convert doc.yamlld --to jsonld\n  \
                    yamlld convert doc.json --to yamlld --profile extended -o doc.yamlld",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: yamlld, jsonld\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "inspect"
                && args[1] != "convert"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("profile").map(|s| s.as_str()),
    );
    let options = Options::from(&config);
    debug!(profile = %options.profile, "configuration loaded");

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("tree");
            let show_linum = sub_matches.get_flag("show-linum");
            handle_inspect_command(path, transform, show_linum, &options);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with("input is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                exit_with("--to is required");
            };
            let from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, from, to, output, &config, &options);
        }
        _ => exit_with("Unknown subcommand. Use --help for usage information."),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, show_linum: bool, options: &Options) {
    let bytes = read_source(path);
    let source = std::str::from_utf8(&bytes)
        .map_err(yamlld_babel::Error::from)
        .unwrap_or_else(|e| exit_with(&format!("Error reading file '{path}': {e}")));
    let output = transforms::execute_transform(source, transform, options, show_linum)
        .unwrap_or_else(|e| exit_with(&format!("Execution error: {e}")));
    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: Option<&str>,
    to: &str,
    output: Option<&str>,
    config: &YamlLdConfig,
    options: &Options,
) {
    let registry = build_registry(config);

    if let Err(e) = registry.get(to) {
        exit_with(&format!("Error: {e}"));
    }

    let bytes = read_source(input);

    // Auto-detect --from if not provided
    let from = match from {
        Some(f) => f.to_string(),
        None => registry
            .detect_format_from_filename(input)
            .or_else(|| registry.detect_format_from_sample(&String::from_utf8_lossy(&bytes)))
            .unwrap_or_else(|| {
                exit_with(&format!(
                    "Error: Could not detect format of '{input}'\nPlease specify --from explicitly"
                ))
            }),
    };
    debug!(%from, %to, "converting {input}");

    // YAML-LD goes through the byte entry point so bad input is reported
    // as an encoding error rather than an I/O one.
    let parsed = if from == "yamlld" {
        yamlld_babel::load_bytes(&bytes, options).map_err(|e| e.to_string())
    } else {
        std::str::from_utf8(&bytes)
            .map_err(|e| yamlld_babel::Error::from(e).to_string())
            .and_then(|source| registry.parse(source, &from, options).map_err(|e| e.to_string()))
    };
    let ir = parsed.unwrap_or_else(|e| exit_with(&format!("Parse error: {e}")));

    let mut text = registry
        .serialize(&ir, to, options)
        .unwrap_or_else(|e| exit_with(&format!("Serialization error: {e}")));
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match output {
        Some(path) => fs::write(path, text)
            .unwrap_or_else(|e| exit_with(&format!("Error writing file '{path}': {e}"))),
        None => print!("{text}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Conversion formats:");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<8} {} (.{})",
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn build_registry(config: &YamlLdConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(YamlLdFormat);
    registry.register(JsonLdFormat {
        pretty: config.convert.pretty_json,
    });
    registry
}

fn load_cli_config(explicit_path: Option<&str>, profile: Option<&str>) -> YamlLdConfig {
    let loader = Loader::new().with_optional_file("yamlld.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match profile {
        Some(profile) => loader
            .set_override("representation.profile", profile.to_string())
            .unwrap_or_else(|err| exit_with(&format!("Invalid --profile: {err}"))),
        None => loader,
    };

    loader
        .build()
        .unwrap_or_else(|err| exit_with(&format!("Failed to load configuration: {err}")))
}

fn read_source(path: &str) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| exit_with(&format!("Error reading file '{path}': {e}")))
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
