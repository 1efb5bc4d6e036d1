#[cfg(test)]
pub mod test {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use serde_json::Value;

    use crate::error::SyncError;
    use crate::flatten::FlatEntry;
    use crate::remote::RemoteConfig;
    use crate::settings::{self, Settings, SettingsInput};
    use crate::tree::{RemoteTree, Tree, require_tree};

    /// Build a tree from a `json!` literal.
    pub fn tree(value: Value) -> Tree {
        require_tree(value, "fixture").unwrap()
    }

    /// Default settings pointed at a specific rc file.
    pub fn settings_with_rc(rc_file: impl Into<PathBuf>) -> Settings {
        Settings {
            rc_file: rc_file.into(),
            ..settings::resolve(SettingsInput::default()).unwrap()
        }
    }

    /// In-memory remote that serves fixed trees and records every write.
    #[derive(Default)]
    pub struct RecordingRemote {
        trees: HashMap<String, RemoteTree>,
        sets: RefCell<Vec<(String, Vec<String>)>>,
        unsets: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl RecordingRemote {
        pub fn with(project: &str, remote: Value) -> Self {
            let mut trees = HashMap::new();
            trees.insert(project.to_string(), tree(remote));
            Self {
                trees,
                ..Default::default()
            }
        }

        /// `(project, ["path=value", ...])` for every `set` call.
        pub fn set_calls(&self) -> Vec<(String, Vec<String>)> {
            self.sets.borrow().clone()
        }

        /// `(project, [path, ...])` for every `unset` call.
        pub fn unset_calls(&self) -> Vec<(String, Vec<String>)> {
            self.unsets.borrow().clone()
        }
    }

    impl RemoteConfig for RecordingRemote {
        fn get(&self, project: &str) -> Result<RemoteTree, SyncError> {
            Ok(self.trees.get(project).cloned().unwrap_or_default())
        }

        fn set(&self, project: &str, entries: &[FlatEntry]) -> Result<(), SyncError> {
            let rendered = entries.iter().map(ToString::to_string).collect();
            self.sets.borrow_mut().push((project.to_string(), rendered));
            Ok(())
        }

        fn unset(&self, project: &str, paths: &[String]) -> Result<(), SyncError> {
            self.unsets
                .borrow_mut()
                .push((project.to_string(), paths.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn recording_remote_serves_and_records() {
        let remote = RecordingRemote::with("app", serde_json::json!({"svc": {"a": "1"}}));
        assert_eq!(remote.get("app").unwrap()["svc"]["a"], "1");
        assert!(remote.get("other").unwrap().is_empty());

        remote.unset("app", &["svc.a".to_string()]).unwrap();
        assert_eq!(
            remote.unset_calls(),
            vec![("app".to_string(), vec!["svc.a".to_string()])]
        );
    }
}
