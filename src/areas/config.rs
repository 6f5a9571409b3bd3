//! Repository configuration (`.twig/config`)
//!
//! A small TOML file holding the commit identity. A missing file means all
//! defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level repository configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub user: UserConfig,
}

/// Identity recorded as author and committer
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            email: default_email(),
        }
    }
}

fn default_name() -> String {
    "Twig User".to_owned()
}

fn default_email() -> String {
    "user@example.com".to_owned()
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read config file {}", path.display()))
            }
        }
    }

    pub fn parse(toml_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file {}", path.display()))
    }
}
