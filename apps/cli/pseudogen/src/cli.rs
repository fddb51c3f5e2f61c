use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

/// Convert source code into readable pseudocode using a hosted language model.
///
/// The API key is read from OPENAI_API_KEY (or the variable named in the
/// config file); a .env file in the working directory is honoured.
#[derive(Parser, Debug, Clone)]
#[command(name = "pseudogen", author, version, about)]
pub struct Cli {
    /// Source file path or http(s) URL
    #[arg(required_unless_present = "list_models")]
    pub source: Option<String>,

    /// Write the pseudocode to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Model identifier (see --list-models)
    #[arg(short, long, value_name = "ID")]
    pub model: Option<String>,

    /// Print the supported models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Config file (default: <config dir>/pseudogen/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write debug logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Stderr log level for the `-v` count. Off by default so stderr stays
    /// clean for the error line.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
