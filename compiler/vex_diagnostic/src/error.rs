/// Failures while turning compiler output into a report.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum FormatError {
    /// A line of compiler output does not have the diagnostic shape.
    #[error("could not parse compiler output line `{line}`")]
    ParseFailure { line: String },
    /// The source line a diagnostic points at could not be read.
    #[error("could not read line {row} of {path}: {reason}")]
    SourceRead {
        path: String,
        row: usize,
        reason: String,
    },
}
