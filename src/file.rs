//! Local JSON files: config trees and the project listing.
//!
//! Config files are plain JSON objects written pretty-printed with two-space
//! indentation and a trailing newline, so they diff cleanly under version
//! control.
//!
//! The project listing lives in the rc file (`.firebaserc` by default) under
//! a `configFiles` key:
//!
//! ```json
//! {
//!   "projects": { "default": "my-app-staging" },
//!   "configFiles": {
//!     "my-app-staging": "env/staging.json",
//!     "my-app-prod": "env/prod.json"
//!   }
//! }
//! ```
//!
//! Listed paths are used as written, relative to the working directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SyncError;
use crate::tree::{Tree, require_tree};

/// Placeholder in a `--file` template that is replaced by the project name.
pub const PROJECT_PLACEHOLDER: &str = "{project}";

/// The part of the rc file this tool reads. Other keys are left alone.
#[derive(Debug, Deserialize)]
struct RcFile {
    #[serde(rename = "configFiles", default)]
    config_files: Option<Map<String, Value>>,
}

/// A configured project and the local file that mirrors its remote config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub project: String,
    pub path: PathBuf,
}

/// Read a JSON config file into a tree.
pub fn read_tree(path: &Path) -> Result<Tree, SyncError> {
    let value = read_json(path)?;
    require_tree(value, &path.display().to_string())
}

/// Write a tree as pretty JSON with a trailing newline.
/// Creates parent directories if needed.
pub fn write_tree(path: &Path, tree: &Tree) -> Result<(), SyncError> {
    let mut content = serde_json::to_string_pretty(tree).map_err(|e| SyncError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })?;
    content.push('\n');

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| SyncError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| SyncError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the `configFiles` mapping from the rc file, in file order.
///
/// A missing rc file or one without `configFiles` is
/// [`SyncError::NoProjectsConfigured`]. Other I/O and parse failures are
/// reported as such.
pub fn read_project_files(rc_path: &Path) -> Result<Vec<ProjectFile>, SyncError> {
    let no_projects = || SyncError::NoProjectsConfigured {
        path: rc_path.to_path_buf(),
    };

    let content = match std::fs::read_to_string(rc_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(no_projects()),
        Err(e) => {
            return Err(SyncError::IoError {
                path: rc_path.to_path_buf(),
                source: e,
            });
        }
    };
    let rc: RcFile = serde_json::from_str(&content).map_err(|e| SyncError::JsonError {
        path: rc_path.to_path_buf(),
        source: e,
    })?;
    let Some(entries) = rc.config_files else {
        return Err(no_projects());
    };

    entries
        .into_iter()
        .map(|(project, path)| match path {
            Value::String(p) => Ok(ProjectFile {
                project,
                path: PathBuf::from(p),
            }),
            _ => Err(SyncError::malformed(
                format!("configFiles in {}", rc_path.display()),
                format!("path for project '{project}' is not a string"),
            )),
        })
        .collect()
}

/// Expand a `--file` template for one project.
pub fn file_for_project(template: &str, project: &str) -> PathBuf {
    PathBuf::from(template.replace(PROJECT_PLACEHOLDER, project))
}

fn read_json(path: &Path) -> Result<Value, SyncError> {
    let content = std::fs::read_to_string(path).map_err(|e| SyncError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| SyncError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn write_is_pretty_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.json");
        let tree = require_tree(json!({"svc": {"port": 8080}}), "t").unwrap();

        write_tree(&path, &tree).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"svc\": {\n    \"port\": 8080\n  }\n}\n");
    }

    #[test]
    fn write_preserves_key_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.json");
        let tree = require_tree(json!({"zeta": {"b": "1", "a": "2"}}), "t").unwrap();

        write_tree(&path, &tree).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let b = content.find("\"b\"").unwrap();
        let a = content.find("\"a\"").unwrap();
        assert!(b < a);
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env").join("staging").join("config.json");

        write_tree(&path, &Tree::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_failure_is_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_tree(&blocker.join("env.json"), &Tree::new()).unwrap_err();
        assert!(matches!(err, SyncError::WriteError { .. }));
        assert!(err.to_string().starts_with("Failed to write"));
    }

    #[test]
    fn read_back_what_was_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.json");
        let tree = require_tree(json!({"svc": {"a": "x", "b": [1, 2]}}), "t").unwrap();

        write_tree(&path, &tree).unwrap();
        assert_eq!(read_tree(&path).unwrap(), tree);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = read_tree(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(SyncError::IoError { .. })));
    }

    #[test]
    fn read_invalid_json_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_tree(&path), Err(SyncError::JsonError { .. })));
    }

    #[test]
    fn read_non_object_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            read_tree(&path),
            Err(SyncError::MalformedInput { .. })
        ));
    }

    #[test]
    fn project_files_in_rc_order() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".firebaserc");
        fs::write(
            &rc,
            r#"{
                "projects": {"default": "app-staging"},
                "configFiles": {"app-staging": "env/staging.json", "app-prod": "env/prod.json"}
            }"#,
        )
        .unwrap();

        let files = read_project_files(&rc).unwrap();
        assert_eq!(
            files,
            vec![
                ProjectFile {
                    project: "app-staging".into(),
                    path: "env/staging.json".into()
                },
                ProjectFile {
                    project: "app-prod".into(),
                    path: "env/prod.json".into()
                },
            ]
        );
    }

    #[test]
    fn missing_rc_means_no_projects() {
        let dir = TempDir::new().unwrap();
        let result = read_project_files(&dir.path().join(".firebaserc"));
        assert!(matches!(
            result,
            Err(SyncError::NoProjectsConfigured { .. })
        ));
    }

    #[test]
    fn rc_without_config_files_means_no_projects() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".firebaserc");
        fs::write(&rc, r#"{"projects": {"default": "x"}}"#).unwrap();
        assert!(matches!(
            read_project_files(&rc),
            Err(SyncError::NoProjectsConfigured { .. })
        ));
    }

    #[test]
    fn rc_with_null_config_files_means_no_projects() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".firebaserc");
        fs::write(&rc, r#"{"configFiles": null}"#).unwrap();
        assert!(matches!(
            read_project_files(&rc),
            Err(SyncError::NoProjectsConfigured { .. })
        ));
    }

    #[test]
    fn rc_config_files_not_an_object_is_json_error() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".firebaserc");
        fs::write(&rc, r#"{"configFiles": ["env/prod.json"]}"#).unwrap();
        assert!(matches!(
            read_project_files(&rc),
            Err(SyncError::JsonError { .. })
        ));
    }

    #[test]
    fn invalid_rc_is_json_error() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".firebaserc");
        fs::write(&rc, "{ nope").unwrap();
        assert!(matches!(
            read_project_files(&rc),
            Err(SyncError::JsonError { .. })
        ));
    }

    #[test]
    fn non_string_path_is_malformed() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join(".firebaserc");
        fs::write(&rc, r#"{"configFiles": {"x": 3}}"#).unwrap();
        let err = read_project_files(&rc).unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn file_template_substitutes_project() {
        assert_eq!(
            file_for_project("env/{project}.json", "app-prod"),
            PathBuf::from("env/app-prod.json")
        );
        assert_eq!(
            file_for_project("shared.json", "app-prod"),
            PathBuf::from("shared.json")
        );
    }
}
