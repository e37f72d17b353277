//! Build configuration.
//!
//! Layered the same way for every front end: [`BuildConfig::default`], then
//! the environment, then command-line flags.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the `vcc` executable.
pub const VCC_ENV: &str = "VEX_VCC";

/// Environment variable holding the compile timeout in seconds.
pub const TIMEOUT_ENV: &str = "VEX_BUILD_TIMEOUT";

/// What the document is and how it is handed to `vcc`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum BuildMode {
    /// A complete VEX file, compiled as-is.
    #[default]
    Default,
    /// A wrangle snippet, wrapped into a function first.
    Snippet,
    /// A file of CVEX functions, compiled as-is.
    Library,
}

impl BuildMode {
    /// The `--context` argument this mode compiles under, if any.
    pub fn context(self) -> Option<&'static str> {
        match self {
            BuildMode::Default => None,
            BuildMode::Snippet | BuildMode::Library => Some("cvex"),
        }
    }
}

/// Where `vcc` writes compiled VEX.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OutputSink {
    /// Discarded; only diagnostics matter.
    #[default]
    Stdout,
    File(PathBuf),
}

/// Settings shared by every build.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// `vcc` executable, a bare name searched on PATH or a path.
    pub vcc: String,
    /// Longest a compile may run before it is stopped.
    pub timeout: Duration,
    /// Include directories searched after the document's own.
    pub include_dirs: Vec<PathBuf>,
    pub vex_output: OutputSink,
    /// Append the generated wrapper to snippet reports.
    pub show_generated: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            vcc: "vcc".to_string(),
            timeout: Duration::from_secs(30),
            include_dirs: Vec::new(),
            vex_output: OutputSink::Stdout,
            show_generated: false,
        }
    }
}

impl BuildConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Values that do not parse are ignored with a warning.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(vcc) = lookup(VCC_ENV).filter(|vcc| !vcc.trim().is_empty()) {
            self.vcc = vcc;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            match parse_timeout(&secs) {
                Some(timeout) => self.timeout = timeout,
                None => tracing::warn!(value = %secs, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        self
    }
}

/// Parse a timeout in (possibly fractional) seconds.
pub fn parse_timeout(secs: &str) -> Option<Duration> {
    let secs: f64 = secs.trim().parse().ok()?;
    if secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

/// Parsed arguments of the `build` command.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub config: BuildConfig,
    pub mode: BuildMode,
    pub file: Option<PathBuf>,
}

/// Parse `build` arguments on top of `config`.
///
/// The first non-flag argument is the file. Unknown or malformed flags are
/// reported and skipped.
pub fn parse_build_options(args: &[String], config: BuildConfig) -> BuildOptions {
    let mut options = BuildOptions {
        config,
        mode: BuildMode::Default,
        file: None,
    };

    for arg in args {
        if arg == "--snippet" {
            options.mode = BuildMode::Snippet;
        } else if arg == "--library" {
            options.mode = BuildMode::Library;
        } else if arg == "--show-generated" {
            options.config.show_generated = true;
        } else if let Some(vcc) = arg.strip_prefix("--vcc=") {
            options.config.vcc = vcc.to_string();
        } else if let Some(secs) = arg.strip_prefix("--timeout=") {
            if let Some(timeout) = parse_timeout(secs) {
                options.config.timeout = timeout;
            } else {
                eprintln!(
                    "warning: invalid timeout '{secs}', using {:?}",
                    options.config.timeout
                );
            }
        } else if let Some(dir) = arg.strip_prefix("--include-dir=") {
            options.config.include_dirs.push(PathBuf::from(dir));
        } else if let Some(output) = arg.strip_prefix("--vex-output=") {
            options.config.vex_output = OutputSink::File(PathBuf::from(output));
        } else if arg.starts_with('-') {
            eprintln!("warning: unknown option '{arg}'");
        } else if options.file.is_none() {
            options.file = Some(PathBuf::from(arg));
        } else {
            eprintln!("warning: ignoring extra argument '{arg}'");
        }
    }

    options
}

#[cfg(test)]
mod tests;
