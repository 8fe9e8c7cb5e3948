use std::path::Path;

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "juggler.toml";
pub const DEFAULT_OUTPUT: &str = "jira_export.tjp";
pub const DEFAULT_TOKEN_ENV: &str = "JIRA_TOKEN";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub user: Option<String>,
    pub query: Option<String>,
    pub output: Option<String>,
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub user: String,
    pub query: String,
    pub output: String,
    pub token_env: String,
}

impl Config {
    /// Load the config file (if any) and merge CLI flags over it.
    /// An explicitly passed `--config` must exist; the default path is
    /// optional since the CLI flags can specify everything.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config.as_deref() {
            Some(path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(path)?)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    parse_config(&std::fs::read_to_string(path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        merge(file_config, cli)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config> {
    let url = cli
        .url
        .clone()
        .or(file.url)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::ConfigValidation("missing JIRA url (--url)".to_string()))?;
    let user = cli
        .user
        .clone()
        .or(file.user)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::ConfigValidation("missing JIRA user (--user)".to_string()))?;
    let query = cli
        .query
        .clone()
        .or(file.query)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::ConfigValidation("missing JQL query (--query)".to_string()))?;

    Ok(Config {
        // trailing slash would produce a double slash in request paths
        url: url.trim_end_matches('/').to_string(),
        user,
        query,
        output: cli
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
        token_env: file
            .token_env
            .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string()),
    })
}
