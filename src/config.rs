// Command-line configuration

use crate::bid::DEFAULT_CURRENCY;
use crate::loader::BidColumns;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "eBid_Monthly_Sales.csv";
pub const DEFAULT_BID_KEY: &str = "98223";

/// How bids are written by the display, find and remove actions
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "bid-tree", about = "Load auction bids into a binary search tree", version)]
pub struct Cli {
    /// CSV export to load with menu option 1
    #[arg(default_value = DEFAULT_CSV_PATH)]
    pub csv_path: PathBuf,

    /// Bid id used by find/remove when the prompt is left blank
    #[arg(default_value = DEFAULT_BID_KEY)]
    pub bid_key: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Currency symbol stripped from the amount column
    #[arg(long, default_value_t = DEFAULT_CURRENCY)]
    pub currency: char,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            csv_path: self.csv_path,
            bid_key: self.bid_key,
            format: self.format,
            columns: BidColumns::default().with_currency(self.currency),
        }
    }
}

/// Settings the shell runs with
#[derive(Debug, Clone)]
pub struct Config {
    pub csv_path: PathBuf,
    pub bid_key: String,
    pub format: OutputFormat,
    pub columns: BidColumns,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            bid_key: DEFAULT_BID_KEY.to_string(),
            format: OutputFormat::Text,
            columns: BidColumns::default(),
        }
    }
}
