use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};
use toml::{value::Table, Value};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Configuration for the code generator itself.
    pub codegen: CodegenConfig,

    /// Any remaining configuration, keyed by renderer name.
    rest: Value,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let mut buffer = String::new();
        File::open(path)
            .with_context(|| "Failed to open config file")?
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read config file")?;

        Config::from_str(&buffer)
    }

    /// Deserializes the configuration section with the given key, usually a
    /// renderer name. Returns `None` when the section is missing or does not
    /// match `T`.
    pub fn get<'de, T: Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let section = self.rest.get(key)?;

        section.clone().try_into().ok()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            codegen: CodegenConfig::default(),
            rest: Value::Table(Table::default()),
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = Value::deserialize(deserializer)?;
        let Value::Table(mut table) = raw else {
            return Err(D::Error::custom("codegen.toml must always be a toml table"));
        };

        let codegen: CodegenConfig = table
            .remove("codegen")
            .map(|codegen| codegen.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let config = Config {
            codegen,
            rest: Value::Table(table),
        };

        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).with_context(|| "Attempted to parse invalid configuration file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct CodegenConfig {
    /// Directory the generated sources are written into, relative to the
    /// project root.
    pub out_dir: PathBuf,
    /// Highest argument count the generated templates are expanded for.
    pub max_arity: usize,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("include"),
            max_arity: 15,
        }
    }
}
