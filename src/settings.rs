//! Tool settings, resolved from layered sources.
//!
//! Lowest to highest priority:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings files        platform config dir, then ./fnconfig.toml
//!        ↑ overridden by
//! Environment vars      FNCONFIG__SORT=true
//!        ↑ overridden by
//! CLI flags             --sort, --rc-file, ...
//! ```
//!
//! Every layer is sparse: it only names the keys it changes. Files are
//! strict, so a misspelled key fails loading with its line number.

use std::path::{Path, PathBuf};

use confique::Config;
use toml::{Table, Value};

use crate::error::SyncError;

pub const APP_NAME: &str = "fnconfig";
pub const ENV_PREFIX: &str = "FNCONFIG";
pub const SETTINGS_FILE: &str = "fnconfig.toml";

#[derive(Config, Debug, Clone, PartialEq)]
pub struct Settings {
    /// JSON file that maps project names to local config files under `configFiles`.
    #[config(default = ".firebaserc")]
    pub rc_file: PathBuf,

    /// Executable used to talk to the remote config store.
    #[config(default = "firebase")]
    pub firebase_bin: String,

    /// get: sort keys alphabetically before writing the local file.
    #[config(default = false)]
    pub sort: bool,

    /// get: only keep remote keys that the local file already has.
    #[config(default = false)]
    pub ignore_untracked: bool,

    /// get: parse remote string values as JSON before writing.
    #[config(default = true)]
    pub parse_values: bool,
}

/// Everything needed to resolve [`Settings`], already read from disk and env.
#[derive(Debug, Default)]
pub struct SettingsInput {
    /// Settings file contents, lowest priority first.
    pub files: Vec<(PathBuf, String)>,
    /// Raw environment variables.
    pub env_vars: Vec<(String, String)>,
    /// Flag values from the command line.
    pub overrides: Vec<(String, Value)>,
}

impl SettingsInput {
    /// Gather settings files and the process environment.
    pub fn discover(overrides: Vec<(String, Value)>) -> Result<Self, SyncError> {
        let mut candidates = Vec::new();
        if let Some(dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
            candidates.push(dirs.config_dir().join(SETTINGS_FILE));
        }
        candidates.push(PathBuf::from(SETTINGS_FILE));

        Ok(Self {
            files: load_existing(&candidates)?,
            env_vars: std::env::vars().collect(),
            overrides,
        })
    }
}

/// Merge all layers and fill defaults. Performs no I/O.
pub fn resolve(input: SettingsInput) -> Result<Settings, SyncError> {
    let mut merged = Table::new();
    for (path, content) in &input.files {
        validate_unknown_keys(content, path)?;
        let table: Table = toml::from_str(content).map_err(|e| SyncError::SettingsParse {
            path: path.clone(),
            source: e,
        })?;
        merged.extend(table);
    }

    merged.extend(env_to_table(ENV_PREFIX, input.env_vars));
    merged.extend(input.overrides);

    let layer: <Settings as Config>::Layer =
        Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| SyncError::SettingsParse {
                path: PathBuf::from("<merged settings>"),
                source: e,
            })?;

    Settings::builder()
        .preloaded(layer)
        .load()
        .map_err(SyncError::from)
}

fn load_existing(paths: &[PathBuf]) -> Result<Vec<(PathBuf, String)>, SyncError> {
    let mut found = Vec::new();
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(content) => found.push((path.clone(), content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(SyncError::IoError {
                    path: path.clone(),
                    source: e,
                });
            }
        }
    }
    Ok(found)
}

/// `FNCONFIG__IGNORE_UNTRACKED=true` becomes `ignore_untracked = true`.
fn env_to_table(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let needle = format!("{prefix}__");
    vars.into_iter()
        .filter_map(|(key, value)| {
            let rest = key.strip_prefix(&needle)?;
            if rest.is_empty() {
                return None;
            }
            Some((rest.to_lowercase(), parse_env_value(&value)))
        })
        .collect()
}

fn parse_env_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    Value::String(s.to_string())
}

fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), SyncError> {
    let mut unknown: Vec<String> = Vec::new();
    let deserializer = toml::Deserializer::new(content);
    let _layer: <Settings as Config>::Layer =
        serde_ignored::deserialize(deserializer, |ignored| unknown.push(ignored.to_string()))
            .map_err(|e| SyncError::SettingsParse {
                path: path.to_path_buf(),
                source: e,
            })?;

    match unknown.into_iter().next() {
        None => Ok(()),
        Some(key) => Err(SyncError::UnknownSetting {
            line: find_key_line(content, &key),
            key,
            path: path.to_path_buf(),
        }),
    }
}

/// 1-indexed line of a top-level `key = ...` assignment, 0 if not found.
fn find_key_line(content: &str, key: &str) -> usize {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map_or(0, |i| i + 1)
}
