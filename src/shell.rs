// 🖥️ Interactive shell - numbered menu over one BinarySearchTree
//
// Every action runs to completion and returns to the menu. Nothing that
// goes wrong while loading, finding or removing ends the loop.

use crate::bid::Bid;
use crate::config::{Config, OutputFormat};
use crate::loader::load_bids;
use crate::tree::{BinarySearchTree, Traversal};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Menu entries, numbered the way the operator types them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    DisplayAll,
    Find,
    Remove,
    DisplayPreOrder,
    DisplayPostOrder,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Load,
        MenuChoice::DisplayAll,
        MenuChoice::Find,
        MenuChoice::Remove,
        MenuChoice::DisplayPreOrder,
        MenuChoice::DisplayPostOrder,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> u32 {
        match self {
            MenuChoice::Load => 1,
            MenuChoice::DisplayAll => 2,
            MenuChoice::Find => 3,
            MenuChoice::Remove => 4,
            MenuChoice::DisplayPreOrder => 5,
            MenuChoice::DisplayPostOrder => 6,
            MenuChoice::Exit => 9,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuChoice::Load => "Load Bids",
            MenuChoice::DisplayAll => "Display All Bids",
            MenuChoice::Find => "Find Bid",
            MenuChoice::Remove => "Remove Bid",
            MenuChoice::DisplayPreOrder => "Display Bids Pre-Order",
            MenuChoice::DisplayPostOrder => "Display Bids Post-Order",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse operator input; `None` for anything that is not a menu number
    pub fn parse(input: &str) -> Option<MenuChoice> {
        let number: u32 = input.trim().parse().ok()?;
        MenuChoice::ALL.iter().copied().find(|c| c.number() == number)
    }
}

/// Outcome of one load action, kept for the caller (and tests)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub faults: usize,
}

pub struct Shell<R, W, E> {
    tree: BinarySearchTree,
    config: Config,
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Shell<R, W, E> {
    pub fn new(config: Config, input: R, out: W, err: E) -> Self {
        Self {
            tree: BinarySearchTree::new(),
            config,
            input,
            out,
            err,
        }
    }

    pub fn tree(&self) -> &BinarySearchTree {
        &self.tree
    }

    /// Run the menu loop until the operator exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Load) => {
                    self.load()?;
                }
                Some(MenuChoice::DisplayAll) => self.display(Traversal::InOrder)?,
                Some(MenuChoice::DisplayPreOrder) => self.display(Traversal::PreOrder)?,
                Some(MenuChoice::DisplayPostOrder) => self.display(Traversal::PostOrder)?,
                Some(MenuChoice::Find) => {
                    let bid_id = self.prompt_bid_id()?;
                    self.find(&bid_id)?;
                }
                Some(MenuChoice::Remove) => {
                    let bid_id = self.prompt_bid_id()?;
                    self.remove(&bid_id)?;
                }
                Some(MenuChoice::Exit) => break,
                None => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.out, "Good bye.")?;
        self.out.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "Menu:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.out, "  {}. {}", choice.number(), choice.label())?;
        }
        write!(self.out, "Enter choice: ")?;
        self.out.flush()?;
        Ok(())
    }

    /// Next input line without its terminator; `None` at end of input
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so a
    /// garbled line reaches the menu as an unknown choice.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_bid_id(&mut self) -> Result<String> {
        write!(self.out, "Enter bid id [{}]: ", self.config.bid_key)?;
        self.out.flush()?;

        let entered = self.read_line()?.map(|l| l.trim().to_string()).unwrap_or_default();
        if entered.is_empty() {
            Ok(self.config.bid_key.clone())
        } else {
            Ok(entered)
        }
    }

    /// Menu option 1: read the configured CSV into the tree
    ///
    /// A file that cannot be read leaves the tree exactly as it was.
    pub fn load(&mut self) -> Result<Option<LoadSummary>> {
        let started = Instant::now();
        writeln!(self.out, "📂 Loading CSV file {}", self.config.csv_path.display())?;

        let report = match load_bids(&self.config.csv_path, &self.config.columns) {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.err, "❌ {:#}", e)?;
                self.report_elapsed(started.elapsed())?;
                return Ok(None);
            }
        };

        writeln!(self.out, "{}", report.header_line())?;

        for fault in &report.faults {
            writeln!(self.err, "❌ Skipped row at {}", fault)?;
        }

        let mut summary = LoadSummary {
            faults: report.faults.len(),
            ..LoadSummary::default()
        };
        for bid in report.bids {
            if self.tree.insert(bid) {
                summary.inserted += 1;
            } else {
                summary.duplicates += 1;
            }
        }

        writeln!(
            self.out,
            "✓ {} bids read from {} ({} duplicate ids skipped, {} bad rows) at {}",
            summary.inserted,
            report.source,
            summary.duplicates,
            summary.faults,
            report.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.out,
            "✓ Tree holds {} bids, height {}",
            self.tree.len(),
            self.tree.height()
        )?;
        self.report_elapsed(started.elapsed())?;

        Ok(Some(summary))
    }

    /// Menu options 2, 5 and 6: print every bid in the given order
    pub fn display(&mut self, order: Traversal) -> Result<()> {
        if self.tree.is_empty() {
            writeln!(self.out, "No bids loaded.")?;
            return Ok(());
        }

        writeln!(self.out, "📊 {} bids ({})", self.tree.len(), order.name())?;
        let format = self.config.format;
        for bid in self.tree.traverse(order) {
            write_listing(&mut self.out, format, bid)?;
        }
        Ok(())
    }

    /// Menu option 3
    pub fn find(&mut self, bid_id: &str) -> Result<Option<Bid>> {
        let started = Instant::now();
        let found = self.tree.search(bid_id).cloned();
        let elapsed = started.elapsed();

        match &found {
            Some(bid) => match self.config.format {
                OutputFormat::Text => writeln!(self.out, "{}", bid)?,
                OutputFormat::Json => writeln!(self.out, "{}", serde_json::to_string(bid)?)?,
            },
            None => writeln!(self.out, "Bid Id {} not found.", bid_id)?,
        }

        self.report_elapsed(elapsed)?;
        Ok(found)
    }

    /// Menu option 4
    pub fn remove(&mut self, bid_id: &str) -> Result<Option<Bid>> {
        let started = Instant::now();
        let removed = self.tree.remove(bid_id);
        let elapsed = started.elapsed();

        match &removed {
            Some(bid) => writeln!(self.out, "✓ Removed bid {}: {}", bid.bid_id, bid.title)?,
            None => writeln!(self.out, "Bid Id {} not found.", bid_id)?,
        }

        self.report_elapsed(elapsed)?;
        Ok(removed)
    }

    fn report_elapsed(&mut self, elapsed: Duration) -> Result<()> {
        writeln!(self.out, "time: {} microseconds", elapsed.as_micros())?;
        writeln!(self.out, "time: {:.6} seconds", elapsed.as_secs_f64())?;
        Ok(())
    }
}

fn write_listing<W: Write>(out: &mut W, format: OutputFormat, bid: &Bid) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", bid.listing())?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(bid)?)?,
    }
    Ok(())
}
