use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Config tree has no values to upload")]
    EmptyTree,

    #[error("Malformed {what}: {reason}")]
    MalformedInput { what: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("`{command}` failed for project '{project}': {stderr}")]
    Remote {
        project: String,
        command: String,
        stderr: String,
    },

    #[error("Could not run `{program}`: {source}")]
    RemoteLaunch {
        program: String,
        source: std::io::Error,
    },

    #[error("No config found. Please add \"configFiles\" to {path}")]
    NoProjectsConfigured { path: PathBuf },

    #[error("File option can only be used together with a single --project")]
    FileRequiresProject,

    #[error("Unknown setting '{key}' in {path} (line {line})")]
    UnknownSetting {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Failed to parse {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),
}

impl SyncError {
    pub(crate) fn malformed(what: impl Into<String>, reason: impl Into<String>) -> Self {
        SyncError::MalformedInput {
            what: what.into(),
            reason: reason.into(),
        }
    }
}
