//! Svgtree formats SVG documents with a deterministic layout.

use clap::Parser;
use svgtree::{
    args::{Args, Command, RunCommand},
    config::Config,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::load()?;

    match args.command {
        Command::Format(args) => args.run(config)?,
    }
    Ok(())
}
