use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docbinder::{DEFAULT_PREFIX, DEFAULT_REPORT_NAME};

/// Docbinder - Word-to-binder assembly tool
#[derive(Parser, Debug)]
#[command(name = "docbinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output machine-readable JSON events
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble the binder: copy referenced PDFs and write the index
    Run {
        /// Input .docx document
        #[arg(short, long)]
        document: PathBuf,

        /// Folder containing the referenced PDFs
        #[arg(short, long)]
        source: PathBuf,

        /// Destination folder (created if absent)
        #[arg(long, default_value = "binder")]
        dest: PathBuf,

        /// Also search subdirectories of the source folder
        #[arg(short, long)]
        recursive: bool,

        /// Keep original filenames instead of "{prefix} {NNN}.pdf"
        #[arg(long)]
        no_rename: bool,

        /// Skip the generated cover pages
        #[arg(long)]
        no_cover: bool,

        /// Prefix for renamed files and cover pages
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Filename of the index spreadsheet inside the destination
        #[arg(long, default_value = DEFAULT_REPORT_NAME)]
        report: String,
    },

    /// List the PDF links found in a document without processing them
    Links {
        /// Input .docx document
        #[arg(short, long)]
        document: PathBuf,
    },
}
