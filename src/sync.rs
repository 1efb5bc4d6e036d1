//! The `get`, `set` and `purge` commands.
//!
//! Each command resolves its target projects, then runs them one after the
//! other. A project that fails is logged and recorded in the report; the
//! remaining projects still run.
//!
//! - `get`: fetch remote, optionally intersect with the existing local file,
//!   optionally sort, optionally decode values, write the local file.
//! - `set`: read the local file, flatten it, upload the entries.
//! - `purge`: unset every remote path the local file no longer has.

use std::fmt;
use std::path::PathBuf;

use crate::codec::decode_tree;
use crate::diff::missing_paths;
use crate::error::SyncError;
use crate::file::{self, ProjectFile};
use crate::flatten::{FlatEntry, flatten};
use crate::remote::RemoteConfig;
use crate::settings::Settings;
use crate::shape::intersect_by_shape;
use crate::sort::sort_tree;
use crate::types::{SyncAction, Targets};

/// What happened to one project.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Remote config was written to `path`.
    Downloaded { path: PathBuf },
    /// Entries from `path` were uploaded (or would have been, on a dry run).
    Uploaded {
        path: PathBuf,
        entries: Vec<FlatEntry>,
        dry_run: bool,
    },
    /// Remote paths were removed (or would have been, on a dry run).
    Purged { paths: Vec<String>, dry_run: bool },
    /// The remote had nothing the local file was missing.
    NothingToPurge,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Downloaded { path } => write!(f, "downloaded to {}", path.display()),
            Outcome::Uploaded {
                path,
                entries,
                dry_run,
            } => {
                let verb = if *dry_run { "would upload" } else { "uploaded" };
                write!(f, "{verb} {} entries from {}", entries.len(), path.display())?;
                for entry in entries {
                    write!(f, "\n  {entry}")?;
                }
                Ok(())
            }
            Outcome::Purged { paths, dry_run } => {
                let verb = if *dry_run { "would remove" } else { "removed" };
                write!(f, "{verb} {} entries", paths.len())?;
                for path in paths {
                    write!(f, "\n  {path}")?;
                }
                Ok(())
            }
            Outcome::NothingToPurge => write!(f, "no config entries to remove"),
        }
    }
}

/// Result of a command for one project.
#[derive(Debug)]
pub struct ProjectOutcome {
    pub project: String,
    pub result: Result<Outcome, SyncError>,
}

/// Results of a command across all of its projects, in run order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<ProjectOutcome>,
}

impl SyncReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match &outcome.result {
                Ok(ok) => write!(f, "{}: {ok}", outcome.project)?,
                Err(e) => write!(f, "{}: failed: {e}", outcome.project)?,
            }
        }
        Ok(())
    }
}

/// Run `action` against every target project.
///
/// Errors in finding the projects abort the whole command; errors within a
/// project are recorded in the report.
pub fn run(
    remote: &dyn RemoteConfig,
    settings: &Settings,
    action: &SyncAction,
) -> Result<SyncReport, SyncError> {
    let targets = resolve_targets(settings, action)?;
    if targets.is_empty() {
        tracing::warn!("No projects selected");
    }
    let mut report = SyncReport::default();

    for target in targets {
        let result = match action {
            SyncAction::Get { .. } => get_project(remote, settings, &target),
            SyncAction::Set { dry_run, .. } => set_project(remote, &target, *dry_run),
            SyncAction::Purge { dry_run, .. } => purge_project(remote, &target, *dry_run),
        };
        if let Err(e) = &result {
            tracing::error!(project = %target.project, "{e}");
        }
        report.outcomes.push(ProjectOutcome {
            project: target.project,
            result,
        });
    }

    Ok(report)
}

/// Work out which projects to run and which local file each one uses.
pub fn resolve_targets(
    settings: &Settings,
    action: &SyncAction,
) -> Result<Vec<ProjectFile>, SyncError> {
    let targets = action.targets();

    if let SyncAction::Set { .. } = action
        && let Some(file) = &targets.file
    {
        return match targets.projects.as_deref() {
            Some([project]) => Ok(vec![ProjectFile {
                project: project.clone(),
                path: file::file_for_project(file, project),
            }]),
            _ => Err(SyncError::FileRequiresProject),
        };
    }

    let configured = file::read_project_files(&settings.rc_file)?;
    Ok(select_projects(configured, targets))
}

fn select_projects(configured: Vec<ProjectFile>, targets: &Targets) -> Vec<ProjectFile> {
    if let Some(wanted) = &targets.projects {
        for name in wanted {
            if !configured.iter().any(|pf| &pf.project == name) {
                tracing::warn!(project = %name, "project is not listed in configFiles, skipping");
            }
        }
    }

    configured
        .into_iter()
        .filter(|pf| {
            targets
                .projects
                .as_ref()
                .is_none_or(|wanted| wanted.contains(&pf.project))
        })
        .map(|pf| match &targets.file {
            Some(template) => ProjectFile {
                path: file::file_for_project(template, &pf.project),
                project: pf.project,
            },
            None => pf,
        })
        .collect()
}

/// Download one project's remote config into its local file.
pub fn get_project(
    remote: &dyn RemoteConfig,
    settings: &Settings,
    target: &ProjectFile,
) -> Result<Outcome, SyncError> {
    let ProjectFile { project, path } = target;
    tracing::info!("Downloading config to {} from {project}", path.display());

    let mut config = remote.get(project)?;

    if settings.ignore_untracked {
        let existing = file::read_tree(path)?;
        config = intersect_by_shape(&config, &existing);
    }
    if settings.sort {
        config = sort_tree(&config);
    }
    let local = if settings.parse_values {
        decode_tree(&config)
    } else {
        config
    };

    file::write_tree(path, &local)?;
    tracing::info!("Done downloading config to {} from {project}", path.display());
    Ok(Outcome::Downloaded { path: path.clone() })
}

/// Upload one project's local file to the remote store.
pub fn set_project(
    remote: &dyn RemoteConfig,
    target: &ProjectFile,
    dry_run: bool,
) -> Result<Outcome, SyncError> {
    let ProjectFile { project, path } = target;
    tracing::info!("Uploading config to {project} from {}", path.display());

    let local = file::read_tree(path)?;
    let entries = flatten(&local)?;

    if dry_run {
        tracing::info!("Dry run, not uploading {} entries to {project}", entries.len());
    } else {
        remote.set(project, &entries)?;
        tracing::info!("Done uploading config to {project} from {}", path.display());
    }

    Ok(Outcome::Uploaded {
        path: path.clone(),
        entries,
        dry_run,
    })
}

/// Remove remote entries of one project that its local file no longer has.
pub fn purge_project(
    remote: &dyn RemoteConfig,
    target: &ProjectFile,
    dry_run: bool,
) -> Result<Outcome, SyncError> {
    let ProjectFile { project, path } = target;
    tracing::info!("Comparing config of {project} against {}", path.display());

    let deployed = remote.get(project)?;
    let local = file::read_tree(path)?;
    let paths = missing_paths(&deployed, &local);

    if paths.is_empty() {
        tracing::info!("No config entries to remove from {project}");
        return Ok(Outcome::NothingToPurge);
    }

    tracing::info!(entries = ?paths, "Removing {} entries from {project}", paths.len());
    if !dry_run {
        remote.unset(project, &paths)?;
        tracing::info!(
            "Done purging config, removed entries not found in {} from {project}",
            path.display()
        );
    }

    Ok(Outcome::Purged { paths, dry_run })
}
