use std::path::PathBuf;

use clap::Parser;

/// Download the wiki card list and write its table as CSV.
#[derive(Debug, Parser)]
#[command(name = "cardlist", version)]
pub struct Cli {
    /// RON config file; defaults to ./cardlist.ron when present
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Page to download
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Class marker of the table to extract
    #[arg(long, value_name = "CLASS")]
    pub table_class: Option<String>,

    /// CSV file to write
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Create missing parent directories of the output file
    #[arg(long)]
    pub create_dirs: bool,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Read the written CSV back and report card counts
    #[arg(long)]
    pub summary: bool,
}
