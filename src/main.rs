//! Tfpilot CLI — a workflow front-end for Terraform.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tfpilot",
    version,
    about = "Terraform workflow front-end — prompt-to-HCL generation, phase-guarded plan/apply, state inventory"
)]
struct Cli {
    #[command(subcommand)]
    command: tfpilot::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = tfpilot::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
