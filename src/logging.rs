use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// How chatty the binary should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Whether results go to the console at all. `--quiet` silences the
    /// report and fatal errors too; the exit status still signals failure.
    pub fn shows_output(self) -> bool {
        self != Verbosity::Quiet
    }

    /// Filter used when `RUST_LOG` does not say otherwise.
    fn default_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "off",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Initialize a tracing subscriber that writes to stderr.
///
/// `--quiet` and `--verbose` win over `RUST_LOG`; otherwise `RUST_LOG`
/// applies, falling back to `info`.
pub fn init(verbosity: Verbosity) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match verbosity {
        Verbosity::Normal => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(verbosity.default_directive()))?,
        _ => EnvFilter::try_new(verbosity.default_directive())?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
