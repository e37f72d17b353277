//! One build, start to finish.
//!
//! ```text
//! resolve vcc ──► wrap (snippet mode) ──► temp .vfl ──► compile ──► format
//! ```
//!
//! The executable is resolved before anything touches the filesystem. The
//! temporary wrapper is a [`NamedTempFile`], so it is removed when the build
//! ends however it ends.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use vex_diagnostic::{format_output, normalize_path, parse_output, FormatContext, GeneratedSource};

use crate::compiler::{Compiler, Invocation};
use crate::config::{BuildConfig, BuildMode};
use crate::resolve::resolve_executable;
use crate::BuildError;

/// A document to build.
#[derive(Clone, Debug)]
pub struct BuildRequest {
    /// Current text of the document.
    pub source: String,
    /// Where the document is saved; `None` for unsaved buffers.
    pub file: Option<PathBuf>,
    pub mode: BuildMode,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuildStatus {
    /// The compiler reported no errors (warnings allowed).
    Succeeded,
    /// The compiler reported errors, or the build could not run.
    Failed,
}

/// The outcome shown to the user.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BuildReport {
    pub report: String,
    pub status: BuildStatus,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn succeeded(&self) -> bool {
        self.status == BuildStatus::Succeeded
    }
}

/// Temp file prefix for generated wrappers.
const WRAPPER_PREFIX: &str = "vex_snippet_";

/// Extension `vcc` expects on source files.
const WRAPPER_SUFFIX: &str = ".vfl";

/// Write the generated wrapper to a fresh temporary file.
fn write_wrapper(text: &str) -> Result<NamedTempFile, BuildError> {
    let mut file = tempfile::Builder::new()
        .prefix(WRAPPER_PREFIX)
        .suffix(WRAPPER_SUFFIX)
        .tempfile()
        .map_err(|source| BuildError::io("creating temporary file", source))?;
    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| BuildError::io("writing temporary file", source))?;
    tracing::debug!(path = %file.path().display(), "wrote snippet wrapper");
    Ok(file)
}

fn document_dir(file: &Path) -> &Path {
    file.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

fn status_of(raw: &str) -> BuildStatus {
    match parse_output(raw) {
        Ok(records) if !records.iter().any(|record| record.is_error()) => BuildStatus::Succeeded,
        _ => BuildStatus::Failed,
    }
}

fn try_build(
    request: &BuildRequest,
    config: &BuildConfig,
    compiler: &dyn Compiler,
) -> Result<BuildReport, BuildError> {
    let file = request.file.as_deref().ok_or(BuildError::UnsavedDocument)?;
    let program = resolve_executable(&config.vcc)?;

    let (generated, temp) = match request.mode {
        BuildMode::Snippet => {
            let wrapped = vex_snippet::wrap(&request.source)?;
            let temp = write_wrapper(&wrapped.text)?;
            (Some(wrapped.text), Some(temp))
        }
        BuildMode::Default | BuildMode::Library => (None, None),
    };
    let input = temp.as_ref().map_or(file, NamedTempFile::path);
    let invocation = Invocation::vcc(program, input, document_dir(file), request.mode, config);

    let started = Instant::now();
    let raw = compiler.compile(&invocation, config.timeout)?;
    let elapsed = started.elapsed();

    let ctx = FormatContext {
        generated: generated.as_deref().map(|text| GeneratedSource {
            path: input,
            text,
            original_text: &request.source,
            original_path: file,
        }),
        elapsed,
        show_generated: config.show_generated,
    };
    let report = BuildReport {
        report: format_output(&raw, &ctx),
        status: status_of(&raw),
        elapsed,
    };
    drop(temp);
    Ok(report)
}

/// A report for a build that never produced compiler output.
fn error_report(request: &BuildRequest, err: &BuildError, elapsed: Duration) -> BuildReport {
    let report = match (err, &request.file) {
        // Shown like a diagnostic against the document, without a position.
        (BuildError::SubprocessTimeout { .. }, Some(file)) => format!(
            "File \"{}\": Error: {err}\n",
            normalize_path(&file.to_string_lossy())
        ),
        _ => format!("error: {err}\n"),
    };
    BuildReport {
        report,
        status: BuildStatus::Failed,
        elapsed,
    }
}

/// Run one build to completion. Never fails: errors become the report.
#[tracing::instrument(level = "debug", skip_all, fields(mode = ?request.mode))]
pub fn run_build(
    request: &BuildRequest,
    config: &BuildConfig,
    compiler: &dyn Compiler,
) -> BuildReport {
    let started = Instant::now();
    match try_build(request, config, compiler) {
        Ok(report) => {
            tracing::info!(status = ?report.status, elapsed = ?report.elapsed, "build finished");
            report
        }
        Err(err) => {
            tracing::info!(%err, "build failed");
            error_report(request, &err, started.elapsed())
        }
    }
}
