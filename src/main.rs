//! CLI entry point for rule-driven tile board generation

use clap::Parser;
use wavetile::io::cli::{BoardRunner, Cli};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    let mut runner = BoardRunner::new(cli);
    runner.run()
}
