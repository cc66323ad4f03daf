use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Local planar heightmap generation tool
#[derive(Parser)]
#[command(name = "terragrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a heightmap job from a config file
    Generate {
        /// Job config JSON (origin, grid, raster path)
        config: PathBuf,

        /// Override the output binary path
        #[arg(long)]
        out_bin: Option<PathBuf>,

        /// Override the output metadata path
        #[arg(long)]
        out_meta: Option<PathBuf>,
    },

    /// Display information about a source raster
    Info {
        /// Path to an .hgt file
        raster: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            out_bin,
            out_meta,
        } => commands::generate::run(config, out_bin, out_meta),
        Commands::Info { raster } => commands::info::run(raster),
    }
}
