//! Keep Cloud Functions runtime config in local JSON files.
//!
//! The remote config store holds one namespace per project, addressed by
//! dotted paths (`service.var_name`) with string values only. fnconfig mirrors
//! each project into a local JSON file you can edit, review and commit:
//!
//! ```text
//! fnconfig get     remote  →  local file
//! fnconfig set     local file  →  remote
//! fnconfig purge   remove remote entries the local file no longer has
//! ```
//!
//! Projects and their files are listed in the rc file (`.firebaserc` by
//! default):
//!
//! ```json
//! { "configFiles": { "my-app-staging": "env/staging.json" } }
//! ```
//!
//! # Tree transforms
//!
//! All of the real work happens in a handful of pure functions over nested
//! JSON objects. None of them do I/O, log, or mutate their inputs, so they
//! are safe to call from anywhere.
//!
//! - [`sort_tree`] orders keys at every level so downloaded files diff cleanly.
//! - [`decode_tree`] / [`encode_tree`] convert between remote strings and
//!   typed local values. Decoding tries JSON first, so `"8080"` becomes a
//!   number and `"hello"` stays a string.
//! - [`flatten`] turns a local tree into `path=value` entries for upload.
//! - [`intersect_by_shape`] drops remote keys the local file does not track.
//! - [`missing_paths`] lists remote paths that the local file has dropped.
//!
//! Objects are containers; every other JSON value, arrays and `null`
//! included, is a leaf. See the [`tree`] module.
//!
//! ## Lossy round trips
//!
//! The remote store only keeps strings. A local value that is a string which
//! happens to look like JSON (`"42"`, `"true"`) is uploaded verbatim and comes
//! back as a number or boolean on the next `get`. Quote-sensitive values
//! should be wrapped in a container the app parses itself.
//!
//! # Commands
//!
//! [`sync::run`] executes a [`SyncAction`] against a [`RemoteConfig`]. Each
//! project runs on its own; a failing project is reported in the
//! [`SyncReport`] and the rest carry on. [`FirebaseCli`] implements
//! `RemoteConfig` by driving the `firebase` executable, which takes care of
//! login and project access.
//!
//! # Settings
//!
//! Tool settings (which rc file, whether `get` sorts, ...) resolve through
//! layers: compiled defaults, `fnconfig.toml` in the platform config dir,
//! `./fnconfig.toml`, `FNCONFIG__*` environment variables, and finally CLI
//! flags. See the [`settings`] module.
//!
//! # Error handling
//!
//! All fallible operations return [`SyncError`]. Flattening a tree without
//! any values is [`SyncError::EmptyTree`] and stops `set` before the remote
//! is contacted.

pub mod error;
pub mod logging;
pub mod settings;
pub mod sync;
pub mod tree;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod codec;
mod diff;
mod file;
mod flatten;
mod remote;
mod shape;
mod sort;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{Cli, GlobalArgs, SyncSubcommand};
pub use codec::{Decoded, decode, decode_leaf, decode_tree, encode_leaf, encode_tree};
pub use diff::missing_paths;
pub use error::SyncError;
pub use file::{ProjectFile, read_project_files, read_tree, write_tree};
pub use flatten::{FlatEntry, flatten};
pub use remote::{FirebaseCli, RemoteConfig};
pub use settings::Settings;
pub use shape::intersect_by_shape;
pub use sort::{sort_tree, sort_value};
pub use sync::{Outcome, ProjectOutcome, SyncReport};
pub use tree::{LocalTree, RemoteTree, Tree, as_container, is_container};
pub use types::{SyncAction, Targets};
