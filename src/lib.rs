// Bid Tree - Core Library
// Exposes the tree store, CSV loader and menu shell for the CLI and tests

pub mod bid;
pub mod config;
pub mod loader;
pub mod shell;
pub mod tree;

// Re-export commonly used types
pub use bid::{parse_amount, Bid, DEFAULT_CURRENCY};
pub use config::{Cli, Config, OutputFormat};
pub use loader::{load_bids, parse_row, read_bids, BidColumns, LoadReport, RowFault};
pub use shell::{LoadSummary, MenuChoice, Shell};
pub use tree::{BinarySearchTree, Traversal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
