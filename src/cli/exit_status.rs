use std::process::ExitCode;

/// Exit status of the generator.
///
/// - `Success` (0): the project file was written
/// - `Error` (2): an input could not be read or parsed, or the output could not be written
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The project file was written.
    Success,
    /// The run was aborted by an error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
