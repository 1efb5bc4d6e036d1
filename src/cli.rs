//! Clap adapter for fnconfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Parsed
//! arguments are turned into a framework-agnostic [`SyncAction`] via
//! [`Cli::action`], and flags that shadow [`Settings`](crate::Settings)
//! fields become the highest-priority settings layer via
//! [`Cli::settings_overrides`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use toml::Value;

use crate::types::{SyncAction, Targets};

/// Sync Cloud Functions runtime config between local JSON files and projects.
#[derive(Debug, Parser)]
#[command(name = "fnconfig", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: SyncSubcommand,
}

/// Options shared by every command.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to the rc file listing projects under "configFiles".
    #[arg(short = 'c', long = "config", global = true)]
    pub rc_file: Option<PathBuf>,

    /// Comma-separated list of project names to run for.
    #[arg(short = 'P', long, global = true)]
    pub project: Option<String>,

    /// Local file to use instead of the one in "configFiles".
    /// For get and purge, "{project}" is replaced by the project name.
    /// For set, requires --project with a single name.
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Executable used to reach the remote config store.
    #[arg(long, global = true)]
    pub firebase_bin: Option<String>,

    /// Disable all logging.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum SyncSubcommand {
    /// Download remote config into local files.
    Get {
        /// Do not save config that is not already in the local file.
        #[arg(short, long)]
        ignore: bool,

        /// Sort config alphabetically before saving.
        #[arg(short, long)]
        sort: bool,

        /// Keep values as the raw strings stored remotely.
        #[arg(short = 'n', long)]
        no_parsing: bool,
    },
    /// Upload local files to the remote store.
    Set {
        /// Show the entries that would be uploaded without uploading them.
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove remote entries that are not in the local file.
    Purge {
        /// Show the paths that would be removed without removing them.
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Convert parsed args into a framework-agnostic `SyncAction`.
    pub fn action(&self) -> SyncAction {
        let targets = Targets {
            projects: self.global.project.as_deref().map(Targets::parse_projects),
            file: self.global.file.clone(),
        };
        match self.command {
            SyncSubcommand::Get { .. } => SyncAction::Get { targets },
            SyncSubcommand::Set { dry_run } => SyncAction::Set { targets, dry_run },
            SyncSubcommand::Purge { dry_run } => SyncAction::Purge { targets, dry_run },
        }
    }

    /// Settings given on the command line, as `(key, value)` pairs.
    ///
    /// Boolean switches only ever turn their setting on (or `parse_values`
    /// off), so an absent switch leaves lower layers in charge.
    pub fn settings_overrides(&self) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        if let Some(rc) = &self.global.rc_file {
            out.push((
                "rc_file".to_string(),
                Value::String(rc.to_string_lossy().into_owned()),
            ));
        }
        if let Some(bin) = &self.global.firebase_bin {
            out.push(("firebase_bin".to_string(), Value::String(bin.clone())));
        }
        if let SyncSubcommand::Get {
            ignore,
            sort,
            no_parsing,
        } = self.command
        {
            if ignore {
                out.push(("ignore_untracked".to_string(), Value::Boolean(true)));
            }
            if sort {
                out.push(("sort".to_string(), Value::Boolean(true)));
            }
            if no_parsing {
                out.push(("parse_values".to_string(), Value::Boolean(false)));
            }
        }
        out
    }
}
