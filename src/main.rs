//! CLI entry point for the road sketching tilemap generator

use clap::Parser;
use roadweave::io::cli::{Cli, SketchRunner};

fn main() -> roadweave::Result<()> {
    let cli = Cli::parse();
    let mut runner = SketchRunner::new(cli);
    runner.run()
}
