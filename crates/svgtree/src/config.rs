//! Types for the configuration file usable by svgtree
use std::{env::current_dir, fs::read_to_string, path::PathBuf};

use anyhow::Context as _;
use etcetera::{choose_base_strategy, BaseStrategy};
use serde::{Deserialize, Serialize};
use svgtree_ast::serialize::Options;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
/// The configuration for formatting
pub struct FormatConfig {
    /// The number of spaces per level of nesting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,
    /// The encoding to declare, overriding the encoding declared by the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Attributes to copy from each element onto children that don't set them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherit: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// The config for the CLI usage of svgtree
pub struct Config {
    /// The options for formatting documents
    pub format: Option<FormatConfig>,
}

impl Config {
    fn load_local() -> std::io::Result<(String, PathBuf)> {
        let mut path = current_dir()?;
        path.push("svgtreerc.json");
        Ok((read_to_string(&path)?, path))
    }

    fn load_base() -> std::io::Result<(String, PathBuf)> {
        let mut path = choose_base_strategy()
            .map_err(std::io::Error::other)?
            .config_dir();
        path.push("svgtree");
        path.push("config.json");
        Ok((read_to_string(&path)?, path))
    }

    /// Tries loading the configuration from well-known paths, falling back to the default
    /// configuration when there is none
    ///
    /// # Errors
    /// When the config exists but cannot be parsed
    pub fn load() -> anyhow::Result<Self> {
        let Ok((file, path)) = Self::load_local().or_else(|_| Self::load_base()) else {
            log::debug!("no configuration found, using defaults");
            return Ok(Self::default());
        };
        log::debug!("loading configuration from {}", path.display());
        Self::parse(&file).with_context(|| {
            format!(
                "Configuration at {} cannot be parsed",
                path.to_string_lossy()
            )
        })
    }

    /// Parses a configuration from json
    ///
    /// # Errors
    /// When the json is invalid or doesn't match the configuration's shape
    pub fn parse(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

impl FormatConfig {
    /// Returns the serializer options for this configuration, with unset fields left to their
    /// defaults
    pub fn options(&self) -> Options {
        let default = Options::default();
        Options {
            indent: self.indent.unwrap_or(default.indent),
            encoding: self.encoding.clone(),
        }
    }

    /// Returns a configuration where each field set in `overrides` replaces the one in `self`
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        Self {
            indent: overrides.indent.or(self.indent),
            encoding: overrides.encoding.clone().or_else(|| self.encoding.clone()),
            inherit: if overrides.inherit.is_empty() {
                self.inherit.clone()
            } else {
                overrides.inherit.clone()
            },
        }
    }
}

#[test]
fn serde() -> anyhow::Result<()> {
    let config = Config::parse(
        r#"{
        "format": {
            "indent": 2,
            "inherit": ["fill", "stroke"]
        }
    }"#,
    )?;

    assert_eq!(
        config.format,
        Some(FormatConfig {
            indent: Some(2),
            encoding: None,
            inherit: vec![String::from("fill"), String::from("stroke")],
        })
    );
    assert_eq!(
        serde_json::to_string(&config)?,
        String::from(r#"{"format":{"indent":2,"inherit":["fill","stroke"]}}"#),
        "unset fields should not be serialized"
    );

    assert_eq!(Config::parse("{}")?, Config::default());
    assert!(Config::parse(r#"{ "format": { "indent": "two" } }"#).is_err());
    Ok(())
}

#[test]
fn merge() {
    let config = FormatConfig {
        indent: Some(2),
        encoding: Some(String::from("UTF-8")),
        inherit: vec![String::from("fill")],
    };
    let overrides = FormatConfig {
        indent: Some(8),
        ..FormatConfig::default()
    };

    assert_eq!(
        config.merge(&overrides),
        FormatConfig {
            indent: Some(8),
            encoding: Some(String::from("UTF-8")),
            inherit: vec![String::from("fill")],
        }
    );
    assert_eq!(FormatConfig::default().merge(&config), config);
}
