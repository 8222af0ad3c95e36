use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["tree", "ir-json"];

const FORMATS: &[&str] = &["yamlld", "jsonld"];

const PROFILES: &[&str] = &["json", "extended"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("yamlld")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting YAML-LD documents")
        .arg_required_else_help(true)
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
                        .value_parser(PossibleValuesParser::new(AVAILABLE_TRANSFORMS))
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
                        .value_parser(PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "yamlld", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "yamlld", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "yamlld", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
