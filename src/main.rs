use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;

mod data;
mod generate;
mod render;
mod scan;
mod types;

#[derive(Parser)]
#[command(name = "scholar-site")]
#[command(about = "Academic homepage static-site generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static site in the output/ directory
    Generate,
    /// Scan papers/ for new PDFs and update data/publications.yml
    Scan {
        /// Quiet mode - suppress per-file output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Remove the generated output/ directory
    Clean,
}

fn run_clean() -> Result<()> {
    let output_path = Path::new("output");
    if output_path.exists() {
        fs::remove_dir_all(output_path)?;
        println!("Removed output/");
    } else {
        println!("Nothing to clean.");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate => generate::run_generate(),
        Commands::Scan { quiet } => scan::run_scan(quiet),
        Commands::Clean => run_clean(),
    }
}
