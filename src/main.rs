//! satchel - offline docset builder

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use satchel::{BuildOptions, Config, build};

#[derive(Parser)]
#[command(name = "satchel")]
#[command(version, about = "Build offline docsets from HTML documentation", long_about = None)]
#[command(after_help = "EXAMPLES:
    satchel init                      Write a starter satchel.json
    satchel build -s ./docs           Build a docset from ./docs
    satchel build -f custom.json      Build with a specific configuration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a docset from a tree of HTML files
    Build {
        /// Directory containing the HTML files to ingest
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Path to the JSON configuration file
        #[arg(short = 'f', long, default_value = "satchel.json")]
        config: PathBuf,

        /// Suppress per-document progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write a starter configuration file
    Init {
        /// Path to create the JSON configuration file at
        #[arg(short = 'f', long, default_value = "satchel.json")]
        config: PathBuf,
    },
}

const STARTER_CONFIG: &str = r#"{
    "name": "Satchel",
    "package": "satchel",
    "index": "index.html",
    "selectors": {
        "title": "Package",
        "dt a": "Command"
    },
    "ignore": [
        "ABOUT"
    ]
}
"#;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build {
            source,
            config,
            quiet,
        } => run_build(&source, &config, quiet),
        Command::Init { config } => run_init(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_build(source: &Path, config_path: &Path, quiet: bool) -> Result<(), String> {
    let config = Config::load(config_path).map_err(|e| {
        format!("could not load '{}': {e} (run `satchel init`?)", config_path.display())
    })?;

    if !quiet {
        println!(
            "Building {}.docset from files in '{}'.",
            config.package,
            source.display()
        );
    }

    let report = build(
        &config,
        &BuildOptions {
            source,
            out_dir: Path::new("."),
            config_file: Some(config_path),
            quiet,
        },
    )
    .map_err(|e| e.to_string())?;

    if !quiet {
        println!(
            "Built {}.docset: {} documents, {} references, {} files copied{}.",
            config.package,
            report.documents,
            report.references,
            report.copied,
            if report.failed > 0 {
                format!(", {} skipped", report.failed)
            } else {
                String::new()
            }
        );
    }
    Ok(())
}

fn run_init(config_path: &Path) -> Result<(), String> {
    if config_path.exists() {
        return Err(format!("'{}' already exists", config_path.display()));
    }
    std::fs::write(config_path, STARTER_CONFIG)
        .map_err(|e| format!("could not write '{}': {e}", config_path.display()))?;
    println!("You may now edit {}", config_path.display());
    Ok(())
}
