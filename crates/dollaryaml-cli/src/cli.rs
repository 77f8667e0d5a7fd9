//! dollaryaml CLI - inspect YAML profiles with environment interpolation
//!
//! Usage:
//!   dollaryaml get profile.yaml database.host
//!   dollaryaml dump profile.yaml --format json
//!   dollaryaml check profile.yaml other.yaml

use clap::{Parser, Subcommand};
use colored::Colorize;
use dollaryaml_core::{Profile, ProfileOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// dollaryaml - YAML profiles with ${NAME:default} environment interpolation
#[derive(Parser)]
#[command(name = "dollaryaml")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log the parsed and resolved profile
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a single resolved value
    Get {
        /// Profile file
        file: PathBuf,

        /// Dotted path to a scalar (e.g., database.host)
        path: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Value to print if the path cannot be resolved
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print the whole profile with every token resolved
    Dump {
        /// Profile file
        file: PathBuf,

        /// Output format: yaml, json
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Print the raw tree without resolving tokens
        #[arg(long)]
        raw: bool,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that files load as profiles
    Check {
        /// Profile file(s) to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Run the CLI with the process arguments
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Get {
            file,
            path,
            format,
            default,
        } => cmd_get(&file, &path, &format, default, cli.debug),

        Commands::Dump {
            file,
            format,
            raw,
            output,
        } => cmd_dump(&file, &format, raw, output, cli.debug),

        Commands::Check { files } => cmd_check(files),
    }
}

fn load_profile(file: &Path, debug: bool) -> Result<Profile, String> {
    let mut profile = Profile::with_options(ProfileOptions {
        debug,
        ..ProfileOptions::default()
    });
    profile
        .read_from_path(file)
        .map_err(|e| format!("Failed to load {}: {}", file.display(), e))?;
    Ok(profile)
}

fn cmd_get(
    file: &Path,
    path: &str,
    format: &str,
    default: Option<String>,
    debug: bool,
) -> ExitCode {
    let profile = match load_profile(file, debug) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    let value = match profile.get_error(path) {
        Ok(v) => v,
        Err(e) => match default {
            Some(default_val) => default_val,
            None => {
                eprintln!("{}: {}", "Error".red(), e);
                return ExitCode::from(1);
            }
        },
    };

    match format {
        "json" => match serde_json::to_string(&value) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                return ExitCode::from(1);
            }
        },
        _ => println!("{}", value),
    }
    ExitCode::SUCCESS
}

fn cmd_dump(
    file: &Path,
    format: &str,
    raw: bool,
    output: Option<PathBuf>,
    debug: bool,
) -> ExitCode {
    let profile = match load_profile(file, debug) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    let result = if raw {
        match format {
            "json" => serde_json::to_string_pretty(profile.raw()).map_err(|e| e.to_string()),
            _ => serde_yaml::to_string(profile.raw()).map_err(|e| e.to_string()),
        }
    } else {
        let resolved = match format {
            "json" => profile.to_json(),
            _ => profile.to_yaml(),
        };
        resolved.map_err(|e| e.to_string())
    };

    match result {
        Ok(content) => {
            if let Some(output_path) = output {
                if let Err(e) = std::fs::write(&output_path, &content) {
                    eprintln!("{}: {}", "Error writing file".red(), e);
                    return ExitCode::from(2);
                }
                eprintln!("{} Wrote to {}", "✓".green(), output_path.display());
            } else if content.ends_with('\n') {
                print!("{}", content);
            } else {
                println!("{}", content);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn cmd_check(files: Vec<PathBuf>) -> ExitCode {
    let mut all_valid = true;

    for file in files {
        match Profile::from_yaml_file(&file) {
            Ok(_) => println!("{} {}: valid profile", "✓".green(), file.display()),
            Err(e) => {
                eprintln!("{} {}: {}", "✗".red(), file.display(), e);
                all_valid = false;
            }
        }
    }

    if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
