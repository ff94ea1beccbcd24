#![forbid(unsafe_code)]

//! Configuration for the live URL synchronization engine.
//!
//! Options come from three layers, each overriding the previous one:
//! built-in defaults, a `[package.metadata.live-url]` manifest section,
//! and `LIVE_URL_*` environment variables.

pub mod errors;

use crate::errors::SyncConfigError;
use config::{Case, Config, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::{env::VarError, fs, path::Path, str::FromStr};
use typed_builder::TypedBuilder;

/// The query key used when no other key is configured.
pub const DEFAULT_QUERY_KEY: &str = "url";

const SECTION_HEADER: &str = r"(?m)^\[package\.metadata\.live-url\][ \t]*$";

/// Options that control how the engine mirrors its text into the host location.
#[derive(TypedBuilder, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SyncOptions {
    /// The query parameter on the host's own location that carries the edited URL.
    /// Defaults to `url`.
    /// Env: LIVE_URL_QUERY_KEY
    #[builder(setter(into), default = default_query_key())]
    #[serde(default = "default_query_key")]
    pub query_key: String,
    /// Skip the history push when the settled text equals the last published one.
    /// Defaults to `true`.
    /// Env: LIVE_URL_DEDUPE_PUBLISH
    #[builder(default = default_dedupe_publish())]
    #[serde(default = "default_dedupe_publish")]
    pub dedupe_publish: bool,
    /// Whether a publish adds a history entry or replaces the current one.
    /// Defaults to `push`.
    /// Env: LIVE_URL_HISTORY_MODE
    #[builder(default)]
    #[serde(default)]
    pub history_mode: HistoryMode,
}

impl SyncOptions {
    /// Creates options from the `LIVE_URL_*` environment variables,
    /// falling back to the defaults for anything that is unset.
    pub fn try_from_env() -> Result<Self, SyncConfigError> {
        Ok(SyncOptions {
            query_key: env_w_default("LIVE_URL_QUERY_KEY", DEFAULT_QUERY_KEY)?,
            dedupe_publish: env_wo_default("LIVE_URL_DEDUPE_PUBLISH")?
                .as_deref()
                .map(bool_from_str)
                .transpose()?
                .unwrap_or_else(default_dedupe_publish),
            history_mode: env_wo_default("LIVE_URL_HISTORY_MODE")?
                .as_deref()
                .map(history_mode_from_str)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions::builder().build()
    }
}

fn default_query_key() -> String {
    DEFAULT_QUERY_KEY.to_string()
}

fn default_dedupe_publish() -> bool {
    true
}

fn env_wo_default(key: &str) -> Result<Option<String>, SyncConfigError> {
    match std::env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(SyncConfigError::EnvError(format!("{key}: {e}"))),
    }
}

fn env_w_default(key: &str, default: &str) -> Result<String, SyncConfigError> {
    env_wo_default(key).map(|val| val.unwrap_or_else(|| default.to_string()))
}

/// How a publish is recorded in the host's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum HistoryMode {
    /// Create a new history entry for every publish.
    #[default]
    Push,
    /// Overwrite the current history entry.
    Replace,
}

impl HistoryMode {
    pub fn is_replace(self) -> bool {
        matches!(self, HistoryMode::Replace)
    }
}

impl FromStr for HistoryMode {
    type Err = SyncConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        history_mode_from_str(input)
    }
}

impl TryFrom<String> for HistoryMode {
    type Error = SyncConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        history_mode_from_str(&s)
    }
}

pub fn history_mode_from_str(input: &str) -> Result<HistoryMode, SyncConfigError> {
    let sanitized = input.trim().to_lowercase();
    match sanitized.as_ref() {
        "push" => Ok(HistoryMode::Push),
        "replace" => Ok(HistoryMode::Replace),
        _ => Err(SyncConfigError::EnvError(format!(
            "{input} is not a supported history mode. Use either `push` or \
             `replace`."
        ))),
    }
}

pub fn bool_from_str(input: &str) -> Result<bool, SyncConfigError> {
    let sanitized = input.trim().to_lowercase();
    match sanitized.as_ref() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SyncConfigError::EnvError(format!(
            "{input} is not a boolean value"
        ))),
    }
}

/// Loads options from the text of a manifest containing a
/// `[package.metadata.live-url]` section. `LIVE_URL_*` environment variables
/// take precedence over the values in the section.
pub fn get_config_from_str(text: &str) -> Result<SyncOptions, SyncConfigError> {
    let header = Regex::new(SECTION_HEADER)
        .map_err(|e| SyncConfigError::ConfigError(e.to_string()))?;
    let next_section = Regex::new(r"(?m)^\s*\[")
        .map_err(|e| SyncConfigError::ConfigError(e.to_string()))?;

    let found = header
        .find(text)
        .ok_or(SyncConfigError::ConfigSectionNotFound)?;
    let body = &text[found.end()..];
    let body = match next_section.find(body) {
        Some(next) => &body[..next.start()],
        None => body,
    };

    let settings = Config::builder()
        .add_source(File::from_str(body, FileFormat::Toml))
        .add_source(
            Environment::with_prefix("LIVE_URL").convert_case(Case::Kebab),
        )
        .build()?;

    settings
        .try_deserialize()
        .map_err(|e| SyncConfigError::ConfigError(e.to_string()))
}

/// Loads options from a manifest file on disk.
///
/// See [`get_config_from_str`].
pub fn get_config_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<SyncOptions, SyncConfigError> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|e| SyncConfigError::ConfigError(e.to_string()))?;
    get_config_from_str(&text)
}

#[cfg(test)]
mod tests;
