use anyhow::Result;
use clap::Parser;
use std::io;

use bid_tree::{Cli, Shell};

fn main() -> Result<()> {
    let config = Cli::parse().into_config();

    println!("🌳 Bid Tree v{}", bid_tree::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("CSV: {}  |  default bid id: {}\n", config.csv_path.display(), config.bid_key);

    let stdin = io::stdin();
    let mut shell = Shell::new(config, stdin.lock(), io::stdout(), io::stderr());
    shell.run()?;

    Ok(())
}
