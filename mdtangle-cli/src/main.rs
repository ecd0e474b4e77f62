//! mdtangle CLI - tangle annotated markdown code blocks into source files

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use mdtangle::config::{read_config, read_config_file, FilePolicy};
use mdtangle::errors::Result;
use mdtangle::interface::Context;

#[derive(Parser)]
#[command(name = "mdtangle")]
#[command(author, version, about = "Tangle markdown code blocks into source files", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// How blocks targeting an unregistered file are handled (overrides config file)
    #[arg(long, global = true, value_enum)]
    policy: Option<FilePolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write generated files from markdown sources
    Tangle {
        /// Dry run - show what would be done without doing it
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Suppress normal output
        #[arg(short, long)]
        quiet: bool,

        /// Only tangle source files matching this glob pattern
        #[arg(long)]
        glob: Vec<String>,

        /// Specific files to tangle
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Print one generated file to stdout
    Show {
        /// Name of the generated file, as written in annotations
        target: String,
    },

    /// List generated files with their sections
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Watch sources and re-tangle on change
    Watch {
        /// Debounce delay in milliseconds (defaults to the config value)
        #[arg(short, long)]
        debounce: Option<u64>,
    },
}

fn load_context(cli: &Cli) -> Result<Context> {
    let base_dir = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => read_config(&base_dir)?,
    };

    if let Some(policy) = cli.policy {
        config.file_policy = policy;
    }

    Ok(Context::new(config, base_dir))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = match load_context(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Tangle {
            dry_run,
            quiet,
            glob,
            files,
        } => {
            let options = commands::TangleOptions {
                dry_run,
                quiet,
                glob,
                files,
            };
            commands::tangle(&ctx, options)
        }

        Commands::Show { target } => commands::show(&ctx, &target),

        Commands::List { json } => commands::list(&ctx, commands::ListOptions { json }),

        Commands::Watch { debounce } => {
            let options = commands::WatchOptions {
                debounce_ms: debounce,
            };
            commands::watch(&ctx, options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn context_for(config: &str, extra: &[&str]) -> Context {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(&config_path, config).unwrap();

        let mut args = vec![
            "mdtangle".to_string(),
            "-C".to_string(),
            dir.path().display().to_string(),
            "-c".to_string(),
            config_path.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        args.push("list".to_string());

        load_context(&Cli::parse_from(args)).unwrap()
    }

    #[test]
    fn test_policy_flag_overrides_config_file() {
        let ctx = context_for("file_policy = \"auto-create\"\n", &["--policy", "strict"]);
        assert_eq!(ctx.config.file_policy, FilePolicy::Strict);

        let ctx = context_for("file_policy = \"strict\"\n", &["--policy", "auto-create"]);
        assert_eq!(ctx.config.file_policy, FilePolicy::AutoCreate);
    }

    #[test]
    fn test_config_file_policy_without_flag() {
        let ctx = context_for("file_policy = \"strict\"\n", &[]);
        assert_eq!(ctx.config.file_policy, FilePolicy::Strict);
    }
}
