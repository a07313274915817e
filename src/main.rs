use clap::Parser;
use sweepdir::cli::{Cli, run_cli};

fn main() {
    let cli = Cli::parse();
    std::process::exit(run_cli(&cli));
}
