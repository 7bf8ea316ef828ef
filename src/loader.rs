// 📂 CSV loader - monthly sales export → Bid records
//
// Export format (header row + one row per bid):
// ArticleTitle,ArticleID,Department,CloseDate,WinningBid,InventoryID,VehicleID,ReceiptNumber,Fund
// "Table","98109","Furniture","11/25/2023","$32.50",...,"General Fund"

use crate::bid::{parse_amount, Bid, DEFAULT_CURRENCY};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ============================================================================
// COLUMN LAYOUT
// ============================================================================

/// Fixed column positions of the fields a Bid needs
#[derive(Debug, Clone, PartialEq)]
pub struct BidColumns {
    pub title: usize,
    pub bid_id: usize,
    pub amount: usize,
    pub fund: usize,
    /// Symbol stripped from the amount column before conversion
    pub currency: char,
}

impl Default for BidColumns {
    fn default() -> Self {
        BidColumns {
            title: 0,
            bid_id: 1,
            amount: 4,
            fund: 8,
            currency: DEFAULT_CURRENCY,
        }
    }
}

impl BidColumns {
    pub fn with_currency(mut self, currency: char) -> Self {
        self.currency = currency;
        self
    }
}

// ============================================================================
// LOAD REPORT
// ============================================================================

/// A row that could not be turned into a Bid. The row is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFault {
    /// 1-based line in the source file (header is line 1)
    pub line_number: usize,
    pub reason: String,
}

impl fmt::Display for RowFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.reason)
    }
}

/// Everything one pass over a CSV file produced
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub source: String,
    pub header: Vec<String>,
    pub bids: Vec<Bid>,
    pub faults: Vec<RowFault>,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    /// Header echoed the way the export tool prints it: `a | b | c | `
    pub fn header_line(&self) -> String {
        self.header.iter().map(|c| format!("{} | ", c)).collect()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load bids from a CSV file on disk
///
/// Failing to open the file is a hard error. Bad rows are collected as
/// faults and skipped.
pub fn load_bids(csv_path: &Path, columns: &BidColumns) -> Result<LoadReport> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    read_bids(file, &csv_path.display().to_string(), columns)
}

/// Load bids from any reader (file, in-memory buffer)
pub fn read_bids<R: Read>(reader: R, source: &str, columns: &BidColumns) -> Result<LoadReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = rdr
        .headers()
        .with_context(|| format!("Failed to read CSV header in {}", source))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut bids = Vec::new();
    let mut faults = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        // +2 because: 1-indexed + header row
        let fallback_line = index + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(e).with_context(|| format!("Failed to read {}", source));
            }
            Err(e) => {
                faults.push(RowFault {
                    line_number: e.position().map(|p| p.line() as usize).unwrap_or(fallback_line),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let line_number = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match parse_row(&record, columns) {
            Ok(bid) => bids.push(bid),
            Err(e) => faults.push(RowFault {
                line_number,
                reason: format!("{:#}", e),
            }),
        }
    }

    Ok(LoadReport {
        source: source.to_string(),
        header,
        bids,
        faults,
        loaded_at: Utc::now(),
    })
}

/// Decode one CSV row into a Bid
pub fn parse_row(record: &StringRecord, columns: &BidColumns) -> Result<Bid> {
    let field = |index: usize, name: &str| -> Result<String> {
        record
            .get(index)
            .map(|v| v.trim().to_string())
            .with_context(|| {
                format!(
                    "missing {} column (index {}, row has {} columns)",
                    name,
                    index,
                    record.len()
                )
            })
    };

    let title = field(columns.title, "title")?;
    let bid_id = field(columns.bid_id, "bid id")?;
    let amount_raw = field(columns.amount, "amount")?;
    let fund = field(columns.fund, "fund")?;

    let amount = parse_amount(&amount_raw, columns.currency)?;

    Ok(Bid {
        bid_id,
        title,
        fund,
        amount,
    })
}
