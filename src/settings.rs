use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "netex-index";
pub const ENV_PREFIX: &str = "NETEX_INDEX";

/// Settings of the binary. A config file, when present, is overridden by
/// `NETEX_INDEX_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Documents, directories of documents and zip archives, loaded in order.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Session time zone used when no document declares one.
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default = "default_log")]
    pub log: String,
    /// Serve lookups on this address after loading.
    #[serde(default)]
    pub listen: Option<SocketAddr>,
}

fn default_log() -> String {
    "info".to_owned()
}

impl Settings {
    /// Reads `netex-index.{toml,json,yaml,...}` from the working directory if
    /// there is one, or the given file which then has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("inputs"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
