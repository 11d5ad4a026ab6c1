use std::fmt;

/// Errors that can occur while inspecting or unpacking an archive.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in minor versions without breaking existing code. Always include a
/// catch-all `_ =>` arm when matching.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source file does not exist.
    FileNotFound { path: String },

    /// Filename suffix matches none of the recognized archive formats.
    UnknownFormat { path: String },

    /// Required external tool is missing from `PATH`.
    ToolNotFound { tool: String },

    /// External tool ran but exited with a failure status.
    ///
    /// `code` is `None` when the child was killed by a signal.
    CommandFailed { program: String, code: Option<i32> },

    /// IO error (destination creation, subprocess pipes).
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "file '{}' does not exist", path)
            }
            Self::UnknownFormat { path } => {
                write!(
                    f,
                    "unknown archive '{}' (expected .tar.gz, .tgz, .tar.bz2 or .zip)",
                    path
                )
            }
            Self::ToolNotFound { tool } => {
                write!(f, "'{}' not found on PATH (is it installed?)", tool)
            }
            Self::CommandFailed { program, code } => match code {
                Some(code) => write!(f, "{} exited with status {}", program, code),
                None => write!(f, "{} was terminated by a signal", program),
            },
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
