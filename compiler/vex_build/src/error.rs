//! Build driver errors.

use std::io;
use std::time::Duration;

use vex_snippet::BindingError;

/// Why a build produced no compiler diagnostics.
///
/// None of these escape a [`BuildSession`](crate::BuildSession): the worker
/// renders each into the report text.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The snippet could not be wrapped.
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("could not find the `{name}` executable; put it on PATH or set VEX_VCC")]
    ExecutableNotFound { name: String },

    /// Include directories are relative to the document, so it needs a path.
    #[error("save the file before building it")]
    UnsavedDocument,

    #[error("compiler did not finish within {timeout:?} and was stopped")]
    SubprocessTimeout { timeout: Duration },

    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        BuildError::Io {
            context: context.into(),
            source,
        }
    }
}
