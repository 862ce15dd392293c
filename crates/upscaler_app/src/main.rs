mod app;
mod cli;
mod config;
mod effects;
mod intake;
mod render;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    app::run(cli)
}
