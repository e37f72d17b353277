//! Build driver for VEX.
//!
//! Ties the snippet wrapper and the diagnostic formatter to a real `vcc`
//! process:
//!
//! ```text
//! BuildSession::submit(request)
//!     └─► worker thread: run_build()
//!             resolve vcc ─► wrap snippet ─► temp .vfl ─► Compiler ─► format_output
//! ```
//!
//! Every failure ends up as text in the returned [`BuildReport`]; nothing
//! here panics or returns an error to the host.

pub mod compiler;
pub mod config;
mod error;
pub mod resolve;
mod session;
mod worker;

use std::sync::Once;

pub use compiler::{Compiler, Invocation, VccCompiler};
pub use config::{parse_build_options, BuildConfig, BuildMode, BuildOptions, OutputSink};
pub use error::BuildError;
pub use resolve::resolve_executable;
pub use session::{BuildHandle, BuildSession, Submission};
pub use worker::{run_build, BuildReport, BuildRequest, BuildStatus};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=vex_build=debug,vex_diagnostic=trace`. Safe to call more than
/// once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
