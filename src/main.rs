use clap::Parser;

use fnconfig::logging::{self, Verbosity};
use fnconfig::settings::{self, SettingsInput};
use fnconfig::{Cli, FirebaseCli, SyncError, SyncReport, sync};

fn main() {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.global.quiet, cli.global.verbose);
    if let Err(e) = logging::init(verbosity) {
        eprintln!("Failed to initialise logging: {e}");
    }

    match run(&cli) {
        Ok(report) => {
            if let Some(text) = render(&report, verbosity) {
                println!("{text}");
            }
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<SyncReport, SyncError> {
    let input = SettingsInput::discover(cli.settings_overrides())?;
    let settings = settings::resolve(input)?;
    tracing::debug!(?settings, "resolved settings");

    let remote = FirebaseCli::new(settings.firebase_bin.clone());
    let report = sync::run(&remote, &settings, &cli.action())?;

    if !report.is_success() {
        tracing::error!(
            "{} of {} projects failed",
            report.failures(),
            report.outcomes.len()
        );
    }
    Ok(report)
}

/// The report text for stdout, or `None` when output is silenced.
fn render(report: &SyncReport, verbosity: Verbosity) -> Option<String> {
    verbosity.shows_output().then(|| report.to_string())
}
