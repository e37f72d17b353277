//! Running `vcc`.
//!
//! [`Compiler`] is the seam between the build worker and the real
//! subprocess; tests substitute their own implementation.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{BuildConfig, BuildMode, OutputSink};
use crate::BuildError;

/// Directory below the document's directory that is also searched.
const INCLUDE_SUBDIR: &str = "include";

/// A fully assembled compiler command line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// The file `vcc` compiles, also the last argument.
    pub input: PathBuf,
}

impl Invocation {
    /// Command line compiling `input` for a document living in `document_dir`.
    ///
    /// ```text
    /// vcc --compile-all --vex-output stdout \
    ///     --include-dir <dir> --include-dir <dir>/include [--include-dir <extra>]... \
    ///     [--context cvex] <input>
    /// ```
    pub fn vcc(
        program: PathBuf,
        input: &Path,
        document_dir: &Path,
        mode: BuildMode,
        config: &BuildConfig,
    ) -> Self {
        let mut args: Vec<OsString> = vec!["--compile-all".into(), "--vex-output".into()];
        args.push(match &config.vex_output {
            OutputSink::Stdout => "stdout".into(),
            OutputSink::File(path) => path.into(),
        });

        let include_dirs = [document_dir.to_path_buf(), document_dir.join(INCLUDE_SUBDIR)];
        for dir in include_dirs.iter().chain(&config.include_dirs) {
            args.push("--include-dir".into());
            args.push(dir.into());
        }

        if let Some(context) = mode.context() {
            args.push("--context".into());
            args.push(context.into());
        }
        args.push(input.into());

        Invocation {
            program,
            args,
            input: input.to_path_buf(),
        }
    }

    /// The command to spawn: no stdin, compiled output discarded, stderr captured.
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

/// Something that compiles an [`Invocation`] and returns its diagnostics.
pub trait Compiler: Send + Sync {
    /// Run the compile, returning everything written to stderr.
    ///
    /// A compile still running after `timeout` is stopped and reported as
    /// [`BuildError::SubprocessTimeout`].
    fn compile(&self, invocation: &Invocation, timeout: Duration) -> Result<String, BuildError>;
}

/// The real `vcc` subprocess.
#[derive(Copy, Clone, Debug)]
pub struct VccCompiler {
    /// How often a running compile is checked for exit.
    pub poll_interval: Duration,
}

impl Default for VccCompiler {
    fn default() -> Self {
        VccCompiler {
            poll_interval: Duration::from_millis(20),
        }
    }
}

type StderrReader = JoinHandle<std::io::Result<Vec<u8>>>;

/// Drain stderr on its own thread so a chatty compiler never blocks on a
/// full pipe while we wait for it.
fn spawn_stderr_reader(child: &mut Child) -> Option<StderrReader> {
    let mut pipe = child.stderr.take()?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    }))
}

/// Kill and reap `child`.
fn stop(child: &mut Child) {
    if let Err(err) = child.kill() {
        tracing::warn!(%err, "failed to kill compiler");
    }
    if let Err(err) = child.wait() {
        tracing::warn!(%err, "failed to reap compiler");
    }
}

impl Compiler for VccCompiler {
    #[tracing::instrument(level = "debug", skip_all, fields(input = %invocation.input.display()))]
    fn compile(&self, invocation: &Invocation, timeout: Duration) -> Result<String, BuildError> {
        let mut child = invocation
            .build_command()
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: invocation.program.display().to_string(),
                source,
            })?;
        let reader = spawn_stderr_reader(&mut child);
        let deadline = Instant::now() + timeout;

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    tracing::debug!(%status, "compiler exited");
                    break;
                }
                Ok(None) if Instant::now() >= deadline => {
                    stop(&mut child);
                    tracing::warn!(?timeout, "compiler timed out");
                    return Err(BuildError::SubprocessTimeout { timeout });
                }
                Ok(None) => thread::sleep(self.poll_interval),
                Err(source) => {
                    stop(&mut child);
                    return Err(BuildError::io("waiting for compiler", source));
                }
            }
        }

        let Some(reader) = reader else {
            return Ok(String::new());
        };
        let stderr = reader
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stderr reader panicked")))
            .map_err(|source| BuildError::io("reading compiler output", source))?;
        Ok(String::from_utf8_lossy(&stderr).into_owned())
    }
}

#[cfg(test)]
mod tests;
