//! nanairo - scene file tool
//!
//! Writes the built-in presets, validates and summarizes `.nana` scene files,
//! and resolves symbolic names to the tokens stored in them.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nanairo_shell::{commands, Result, ShellConfig};

#[derive(Parser)]
#[command(name = "nanairo")]
#[command(about = "Scene file tool for the Nanairo renderer", long_about = None)]
struct Cli {
    /// Config file to use instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a built-in preset scene
    Default {
        /// Output file (default: <scene_dir>/<preset>.nana)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Preset name (default: the configured preset)
        #[arg(short, long)]
        preset: Option<String>,
    },
    /// Report every validation error in a scene file
    Validate {
        /// Path to the .nana file
        file: PathBuf,
    },
    /// Display information about a scene file
    Info {
        /// Path to the .nana file
        file: PathBuf,
    },
    /// Copy a scene file to the configured backup location
    Backup {
        /// Path to the .nana file
        file: PathBuf,
    },
    /// Print the token of each symbolic name
    Lookup {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List every registered token
    Tokens,
    /// List the preset scenes
    Presets,
}

fn main() {
    let cli = Cli::parse();

    let config = match ShellConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_logging("info");
            log::error!("{}", err);
            std::process::exit(2);
        }
    };
    init_logging(config.log_level.as_deref().unwrap_or("info"));
    if let Some(path) = &config.config_path {
        log::debug!("Using config {}", path.display());
    }

    if let Err(err) = run(cli.command, &config) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(command: Commands, config: &ShellConfig) -> Result<()> {
    match command {
        Commands::Default { output, preset } => {
            let path = commands::write_default(config, preset.as_deref(), output.as_deref())?;
            println!("{}", path.display());
        }
        Commands::Validate { file } => print!("{}", commands::validate(&file)?),
        Commands::Info { file } => print!("{}", commands::info(&file)?),
        Commands::Backup { file } => {
            let path = commands::backup(config, &file)?;
            println!("{}", path.display());
        }
        Commands::Lookup { names } => print!("{}", commands::lookup(&names)?),
        Commands::Tokens => print!("{}", commands::tokens()),
        Commands::Presets => print!("{}", commands::presets()),
    }
    Ok(())
}
