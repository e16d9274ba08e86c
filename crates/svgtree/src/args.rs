//! Command line arguments
use clap::{Parser, Subcommand};

use crate::{commands::Format, config::Config};

/// A command that can be run from the command line
pub trait RunCommand {
    /// # Errors
    ///
    /// If any part of the lifecycle fails
    /// * Fails to read or parse any files
    /// * Fails to write or serialize to any files
    fn run(self, config: Config) -> anyhow::Result<()>;
}

#[derive(Parser)]
#[clap(
    bin_name = "svgtree",
    name = "svgtree",
    author,
    version,
    about = "Builds SVG documents into a tree and writes them back out",
    long_about = None
)]
/// The arguments of the svgtree binary
pub struct Args {
    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
/// The commands of the svgtree binary
pub enum Command {
    /// Format SVG documents with a deterministic layout
    #[clap(alias = "fmt")]
    Format(Format),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser as _;

    use super::{Args, Command};

    #[test]
    fn parse_args() {
        let args = Args::parse_from([
            "svgtree", "fmt", "a.svg", "b", "--indent", "2", "-o", "out", "--inherit", "fill",
            "--inherit", "stroke",
        ]);
        let Command::Format(format) = args.command;
        assert_eq!(format.paths, vec![PathBuf::from("a.svg"), PathBuf::from("b")]);
        assert_eq!(format.output, Some(PathBuf::from("out")));
        assert_eq!(format.indent, Some(2));
        assert_eq!(format.encoding, None);
        assert_eq!(format.inherit, vec!["fill", "stroke"]);
    }
}
