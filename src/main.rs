//! Pug Runtime CLI
//!
//! Renders a JSON attribute object the way compiled templates do.
//!
//! Usage:
//!   pug-runtime [OPTIONS] [FILE]
//!
//! Options:
//!   -m, --merge <FILE>   Merge another JSON attribute object on top (repeatable)
//!   -c, --config <FILE>  Runtime configuration (TOML format)
//!       --terse          Force HTML5 boolean attributes
//!       --no-terse       Force XHTML-style boolean attributes
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pug_runtime::{merge_all, AttributeMap, Runtime, RuntimeConfig};

#[derive(Parser)]
#[command(name = "pug-runtime")]
#[command(about = "Render JSON attribute maps as HTML attribute strings")]
struct Cli {
    /// Input JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// JSON attribute files merged on top of the input, in order
    #[arg(short, long)]
    merge: Vec<PathBuf>,

    /// Runtime configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render boolean attributes HTML5-style
    #[arg(long, conflicts_with = "no_terse")]
    terse: bool,

    /// Render boolean attributes as key="key"
    #[arg(long)]
    no_terse: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match RuntimeConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };
    if cli.terse {
        config.terse = true;
    }
    if cli.no_terse {
        config.terse = false;
    }

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut maps = vec![parse_map(&source, cli.input.as_deref())];
    for path in &cli.merge {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
        maps.push(parse_map(&content, Some(path)));
    }

    let runtime = Runtime::new(config);
    println!("{}", runtime.attrs(&merge_all(maps)));
}

fn parse_map(content: &str, origin: Option<&Path>) -> AttributeMap {
    match serde_json::from_str(content) {
        Ok(map) => map,
        Err(e) => {
            let origin = origin
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdin".to_string());
            eprintln!("Error parsing attributes from {}: {}", origin, e);
            std::process::exit(1);
        }
    }
}
