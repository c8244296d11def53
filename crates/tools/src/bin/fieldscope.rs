//! Field Analysis Tool
//!
//! Run flow probes, tensor glyphs and tensor lines over built-in fields.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin fieldscope -- lines --field helix --family major --hash
//! cargo run --bin fieldscope -- sample --field vortex --at 0.5,0,0
//! ```

use clap::Parser;
use std::process;

use tensorfield_tools::commands::{Command, run};

#[derive(Parser, Debug)]
#[command(name = "fieldscope")]
#[command(about = "Inspect vector and tensor fields")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    tensorfield_tools::init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
