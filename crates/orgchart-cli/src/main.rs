//! Orgchart CLI - Lay out reporting hierarchies as JSON

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized once inside `run`, after the flags are known
    let app = cli::OrgChartApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
