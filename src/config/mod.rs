use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::invoice_gen::DEFAULT_DATE_FORMAT;

const ENV_PREFIX: &str = "INVOICE_";

/// Configuration for the application
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory the invoice PDFs are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// chrono format used for the From/To columns
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Log destination; the terminal itself belongs to the UI
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_dir() -> String {
    "invoices".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_log_file() -> String {
    "travel-invoice.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command line overrides for the environment configuration
#[derive(Debug, Default, Parser)]
#[command(name = "travel-invoice", about = "Tirupati Travels invoice entry")]
pub struct Cli {
    /// Directory the invoice PDFs are written to
    #[arg(long)]
    pub output_dir: Option<String>,
    /// chrono format for dates in the invoice table
    #[arg(long)]
    pub date_format: Option<String>,
    /// File the application log is written to
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from `INVOICE_*` environment variables
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        Self::from_pairs(std::env::vars())
    }

    fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(pairs)?)
    }

    pub fn apply(mut self, cli: Cli) -> Self {
        if let Some(output_dir) = cli.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(date_format) = cli.date_format {
            self.date_format = date_format;
        }
        if let Some(log_file) = cli.log_file {
            self.log_file = log_file;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.trim().is_empty() {
            bail!("output directory must not be empty");
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("invalid date format {:?}", self.date_format);
        }
        Ok(())
    }
}

/// Load `.env`, the environment and the command line, in that order of precedence
pub fn init() -> Result<Config> {
    let cli = Cli::parse();
    let config = Config::load()?.apply(cli);
    config.validate()?;
    Ok(config)
}
