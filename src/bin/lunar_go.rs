//! Thin command-line driver over the translator core.
//!
//! The core consumes an already type-checked program; this binary does not
//! parse or type-check source itself, so its only real capability is
//! emitting the fixed runtime prelude a translated program depends on.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lunar-go")]
#[command(about = "Go-to-Lua source translator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the fixed runtime prelude a translated program depends on.
    Prelude {
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Prelude { output } => cmd_prelude(output.as_deref()),
    }
}

fn cmd_prelude(output: Option<&std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut w = lunar_go::writer::Writer::new(&mut sink);
    lunar_go::emit_runtime_prelude(&mut w)?;
    Ok(())
}
