//! Single-flight build session.
//!
//! At most one build runs per session. A request arriving while one is in
//! flight is turned away, not queued: by the time it could run, the user has
//! usually asked again.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::compiler::{Compiler, VccCompiler};
use crate::config::BuildConfig;
use crate::worker::{run_build, BuildReport, BuildRequest, BuildStatus};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum SessionState {
    Idle,
    Running,
}

/// Puts the session back to idle when the worker ends, panics included.
struct IdleOnDrop(Arc<Mutex<SessionState>>);

impl Drop for IdleOnDrop {
    fn drop(&mut self) {
        *self.0.lock() = SessionState::Idle;
    }
}

/// A build running on its worker thread.
#[derive(Debug)]
pub struct BuildHandle {
    handle: JoinHandle<BuildReport>,
}

impl BuildHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the build's report.
    pub fn join(self) -> BuildReport {
        self.handle.join().unwrap_or_else(|_| BuildReport {
            report: "error: build worker panicked\n".to_string(),
            status: BuildStatus::Failed,
            elapsed: Duration::ZERO,
        })
    }
}

/// Result of [`BuildSession::submit`].
#[derive(Debug)]
pub enum Submission {
    Started(BuildHandle),
    /// Another build is still running.
    Rejected,
}

/// Owns the configuration and compiler shared by all builds.
pub struct BuildSession {
    state: Arc<Mutex<SessionState>>,
    config: Arc<BuildConfig>,
    compiler: Arc<dyn Compiler>,
}

impl BuildSession {
    /// A session running the real `vcc`.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_compiler(config, Arc::new(VccCompiler::default()))
    }

    pub fn with_compiler(config: BuildConfig, compiler: Arc<dyn Compiler>) -> Self {
        BuildSession {
            state: Arc::new(Mutex::new(SessionState::Idle)),
            config: Arc::new(config),
            compiler,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        *self.state.lock() == SessionState::Running
    }

    /// Start `request` on a worker thread unless a build is already running.
    pub fn submit(&self, request: BuildRequest) -> Submission {
        {
            let mut state = self.state.lock();
            if *state == SessionState::Running {
                tracing::info!("build already running, request rejected");
                return Submission::Rejected;
            }
            *state = SessionState::Running;
        }

        let guard = IdleOnDrop(Arc::clone(&self.state));
        let config = Arc::clone(&self.config);
        let compiler = Arc::clone(&self.compiler);
        let handle = thread::spawn(move || {
            let _guard = guard;
            run_build(&request, &config, compiler.as_ref())
        });
        Submission::Started(BuildHandle { handle })
    }
}
