//! Command-line interface for Bracken
//! This binary converts Bracken files into other formats (HTML, Markdown,
//! TeX, wiki markup, RTF, plain text).
//!
//! Usage:
//!   bracken `<path>` [--format `<format>`] [--output `<path>`]  - Convert a file
//!   bracken `<path>` --dump `<stage>`                           - Dump pipeline internals
//!   bracken --list-formats                                      - List output formats

use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Arg, ArgAction, Command};

use bracken_babel::formats::Markdown;
use bracken_babel::RendererRegistry;
use bracken_config::{BrackenConfig, Loader};
use bracken_parser::syntax::strip_comments;
use bracken_parser::{lex, parse_document, Outline};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("bracken")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting Bracken files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the Bracken file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: from configuration)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file (default: standard output)"),
        )
        .arg(
            Arg::new("no-wrap")
                .long("no-wrap")
                .help("Render the document bare, without the format's body frame")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .value_parser(["lexemes", "ir", "outline"])
                .help("Dump a pipeline stage as JSON instead of converting"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        for format in RendererRegistry::with_defaults().formats() {
            println!("{}", format);
        }
        return;
    }

    let config = load_config(matches.get_one::<String>("config").map(PathBuf::from));

    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing formats");
    let source = std::fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("Cannot read {}: {}", path, error);
        exit(1);
    });

    if let Some(stage) = matches.get_one::<String>("dump") {
        handle_dump_command(&source, stage);
        return;
    }

    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.convert.default_format.clone());
    let wrap = config.convert.wrap && !matches.get_flag("no-wrap");

    let mut registry = RendererRegistry::with_defaults();
    registry.register(Markdown::new(
        config.markdown.use_html,
        config.markdown.github_flavored,
    ));

    let result = registry
        .convert_file(&source, &format, wrap, Some(path))
        .unwrap_or_else(|error| {
            eprintln!("Conversion error: {}", error);
            eprintln!("\nAvailable formats:");
            for format in registry.formats() {
                eprintln!("  {}", format);
            }
            exit(1);
        });

    match matches.get_one::<String>("output") {
        Some(output) => {
            if let Err(error) = std::fs::write(output, result) {
                eprintln!("Cannot write {}: {}", output, error);
                exit(1);
            }
        }
        None => print!("{}", result),
    }
}

fn load_config(user_file: Option<PathBuf>) -> BrackenConfig {
    let mut loader = Loader::new();
    if let Some(path) = user_file {
        loader = loader.with_user_file(&path);
    } else {
        loader = loader.with_user_file(Path::new(".bracken.toml"));
    }
    loader.load().unwrap_or_else(|error| {
        eprintln!("Configuration error: {}", error);
        exit(1);
    })
}

/// Dump a pipeline stage as pretty JSON.
fn handle_dump_command(source: &str, stage: &str) {
    let stripped = strip_comments(source);
    let serialized = match stage {
        "lexemes" => serde_json::to_string_pretty(&lex(&stripped)),
        _ => {
            let elements = parse_document(source).unwrap_or_else(|error| {
                eprintln!("Parse error: {}", error);
                exit(1);
            });
            match stage {
                "ir" => serde_json::to_string_pretty(&elements),
                "outline" => serde_json::to_string_pretty(&Outline::build(&elements)),
                other => {
                    eprintln!("Unknown dump stage `{}`", other);
                    exit(1);
                }
            }
        }
    };
    match serialized {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("Cannot serialize {}: {}", stage, error);
            exit(1);
        }
    }
}
