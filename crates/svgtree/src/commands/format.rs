use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    args::RunCommand,
    config::{Config, FormatConfig},
    format_source,
    fs::{load_files, write_file},
};

#[derive(clap::Args, Debug)]
/// Parses each document and writes it back out with a deterministic layout
pub struct Format {
    /// The target paths to format
    #[clap(value_parser, default_value = ".")]
    pub paths: Vec<PathBuf>,
    /// The file or directory to output results to.
    /// Defaults to stdout
    #[clap(long, short)]
    pub output: Option<PathBuf>,
    /// The number of spaces per level of nesting. Defaults to 4
    #[clap(long, short)]
    pub indent: Option<usize>,
    /// The encoding to declare, instead of the one declared by each document
    #[clap(long, short)]
    pub encoding: Option<String>,
    /// An attribute to copy from each element onto children that don't set it
    #[clap(long)]
    pub inherit: Vec<String>,
}

impl Format {
    /// Returns the configuration with any options given on the command line taking precedence
    pub fn resolve(&self, config: Option<FormatConfig>) -> FormatConfig {
        config.unwrap_or_default().merge(&FormatConfig {
            indent: self.indent,
            encoding: self.encoding.clone(),
            inherit: self.inherit.clone(),
        })
    }
}

impl RunCommand for Format {
    fn run(self, config: Config) -> anyhow::Result<()> {
        let config = self.resolve(config.format);
        log::debug!("formatting with {config:?}");

        let files = load_files(&self.paths)?;
        if files.len() > 1 && self.output.as_ref().is_some_and(|output| !output.is_dir()) {
            anyhow::bail!("Cannot write multiple documents to a single file");
        }
        for (path, source) in &files {
            let output = format_source(source, &config)
                .with_context(|| format!("Cannot format {}", path.display()))?;
            write_file(self.output.as_deref(), path, &output)?;
        }
        Ok(())
    }
}
