/// Which projects a command runs against, and where their files live.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Targets {
    /// Project names to run for. `None` means every configured project.
    pub projects: Option<Vec<String>>,
    /// Local file to use instead of the `configFiles` entry.
    /// For `get` and `purge`, `{project}` is replaced by the project name.
    pub file: Option<String>,
}

impl Targets {
    /// Parse a comma-separated `--project` value. Blank names are dropped.
    pub fn parse_projects(raw: &str) -> Vec<String> {
        raw.trim()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A sync operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    /// Download remote config into local files.
    Get { targets: Targets },
    /// Upload local files to the remote store.
    Set { targets: Targets, dry_run: bool },
    /// Remove remote entries that local files no longer have.
    Purge { targets: Targets, dry_run: bool },
}

impl SyncAction {
    pub fn targets(&self) -> &Targets {
        match self {
            SyncAction::Get { targets }
            | SyncAction::Set { targets, .. }
            | SyncAction::Purge { targets, .. } => targets,
        }
    }
}
