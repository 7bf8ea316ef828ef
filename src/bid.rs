// Bid record - the payload stored at every tree node

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt;

/// Currency symbol stripped from amounts unless configured otherwise
pub const DEFAULT_CURRENCY: char = '$';

/// A single auction bid loaded from the monthly sales CSV
///
/// `bid_id` is the ordering key: comparison is lexicographic on the raw
/// string, so "98001" < "98109" < "9999".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bid {
    #[serde(rename = "Bid_ID")]
    pub bid_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Fund")]
    pub fund: String,

    #[serde(rename = "Amount")]
    pub amount: f64,
}

impl Bid {
    pub fn new(
        bid_id: impl Into<String>,
        title: impl Into<String>,
        fund: impl Into<String>,
        amount: f64,
    ) -> Self {
        Bid {
            bid_id: bid_id.into(),
            title: title.into(),
            fund: fund.into(),
            amount,
        }
    }

    /// One-line listing used by the traversal displays
    pub fn listing(&self) -> String {
        format!(
            "Bid ID: {} | Title: {} | Amount: {:.2} | Fund: {}",
            self.bid_id, self.title, self.amount, self.fund
        )
    }
}

/// Short form used when a single bid is found
impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {:.2} | {}",
            self.bid_id, self.title, self.amount, self.fund
        )
    }
}

/// Parse a currency-formatted amount ("$1,234.50") into a number
///
/// Every occurrence of `currency` is removed before conversion. Thousands
/// separators are dropped too since the sales export writes them for
/// larger amounts. Anything left that is not a number is an error.
pub fn parse_amount(raw: &str, currency: char) -> Result<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != currency && *c != ',')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(anyhow!("empty amount: {:?}", raw));
    }

    cleaned
        .parse::<f64>()
        .map_err(|e| anyhow!("invalid amount {:?}: {}", raw, e))
}
