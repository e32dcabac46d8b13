use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};

use jardep::declaration::parse_declarations;
use jardep::maven::paths::{dependency_paths, parse_artifact_path};

#[derive(Parser)]
#[command(name = "jardep", about = "Inspect jar dependency declarations")]
struct Cli {
    /// more logging, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the derived properties of every dependency declared in a JSON file
    Show {
        file: PathBuf,
    },
    /// Parse a path relative to a Maven repository root
    Locate {
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Show { file } => show(&file),
        Command::Locate { path } => locate(&path),
    }
}

fn show(file: &Path) -> anyhow::Result<()> {
    debug!("reading declarations from {}", file.display());
    let json = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    for dep in parse_declarations(&json)? {
        println!("{}", dep);
        println!("  configurations: {}", dep.configurations().join(", "));
        match dep.classifier() {
            Ok(classifier) => println!("  classifier:     {}", classifier.unwrap_or("-")),
            Err(e) => println!("  classifier:     {}", e),
        }
        println!("  fingerprint:    {}", dep.cache_fingerprint());
        match dependency_paths(&dep) {
            Ok(paths) => {
                for path in paths {
                    println!("  path:           {}", path);
                }
            }
            Err(e) => println!("  path:           {}", e),
        }
    }
    Ok(())
}

fn locate(path: &str) -> anyhow::Result<()> {
    let location = parse_artifact_path(path)?;
    println!("{}", location.coordinate);
    println!("  classifier: {}", location.classifier.as_deref().unwrap_or("-"));
    println!("  extension:  {}", location.ext);
    Ok(())
}
