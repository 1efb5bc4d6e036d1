//! The remote config store, addressed by project name.
//!
//! [`RemoteConfig`] is the seam the sync commands talk to. [`FirebaseCli`]
//! drives the `firebase` executable, which already handles login and project
//! access, so nothing here deals with credentials.

use std::process::Command;

use serde_json::Value;

use crate::error::SyncError;
use crate::flatten::FlatEntry;
use crate::tree::{RemoteTree, require_tree, validate_remote};

/// A remote key-value config store with one namespace per project.
pub trait RemoteConfig {
    /// Fetch the full config tree of `project`.
    fn get(&self, project: &str) -> Result<RemoteTree, SyncError>;

    /// Store each `path=value` entry in `project`.
    fn set(&self, project: &str, entries: &[FlatEntry]) -> Result<(), SyncError>;

    /// Remove each dotted path (and everything under it) from `project`.
    fn unset(&self, project: &str, paths: &[String]) -> Result<(), SyncError>;
}

/// [`RemoteConfig`] backed by the `firebase functions:config:*` commands.
#[derive(Debug, Clone)]
pub struct FirebaseCli {
    program: String,
}

impl FirebaseCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, project: &str, subcommand: &str, args: &[String]) -> Result<String, SyncError> {
        tracing::debug!(program = %self.program, subcommand, project, "running remote command");
        let output = Command::new(&self.program)
            .arg(subcommand)
            .args(args)
            .arg("--project")
            .arg(project)
            .output()
            .map_err(|e| SyncError::RemoteLaunch {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SyncError::Remote {
                project: project.to_string(),
                command: subcommand.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for FirebaseCli {
    fn default() -> Self {
        Self::new("firebase")
    }
}

impl RemoteConfig for FirebaseCli {
    fn get(&self, project: &str) -> Result<RemoteTree, SyncError> {
        let stdout = self.run(project, "functions:config:get", &[])?;
        parse_remote(project, &stdout)
    }

    fn set(&self, project: &str, entries: &[FlatEntry]) -> Result<(), SyncError> {
        let args: Vec<String> = entries.iter().map(ToString::to_string).collect();
        self.run(project, "functions:config:set", &args)?;
        Ok(())
    }

    fn unset(&self, project: &str, paths: &[String]) -> Result<(), SyncError> {
        self.run(project, "functions:config:unset", paths)?;
        Ok(())
    }
}

/// Parse the JSON printed by `functions:config:get` into a checked remote tree.
pub fn parse_remote(project: &str, stdout: &str) -> Result<RemoteTree, SyncError> {
    let what = format!("remote config of '{project}'");
    let value: Value =
        serde_json::from_str(stdout.trim()).map_err(|e| SyncError::malformed(&what, e.to_string()))?;
    let tree = require_tree(value, &what)?;
    validate_remote(&tree)?;
    Ok(tree)
}
