use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picvault")]
#[command(author, version, about = "Local durable image vault")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store an image file in the vault
    Add {
        /// Image file to store
        #[arg(required = true)]
        file: PathBuf,

        /// Optional title annotation
        #[arg(short, long)]
        title: Option<String>,

        /// Optional description annotation
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all stored images, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}
