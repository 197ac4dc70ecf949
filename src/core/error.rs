//! Error taxonomy for the whole tool.
//!
//! Every failure a user action can hit maps to one of these kinds:
//! generation failures write nothing, command failures carry the captured
//! diagnostics already printed, a missing state artifact is *not* an error
//! (see `state::read_state`), while an unreadable one is.

use crate::core::workflow::Phase;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Config file present but unreadable or invalid TOML.
    #[error("config error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Transport or API-level failure from the completion endpoint.
    #[error("code generation failed: {0}")]
    Generation(String),

    /// A terraform invocation exited non-zero or could not be launched.
    /// The captured diagnostics were already shown alongside the action.
    #[error("{command} failed (exit code {exit_code})")]
    CommandFailed { command: String, exit_code: i32 },

    /// No definition file in the working directory yet.
    #[error("no definition file at {0:?}; generate or upload one first")]
    MissingDefinition(PathBuf),

    /// State artifact exists but is not valid JSON of the expected shape.
    #[error("unreadable state file {path:?}: {reason}")]
    UnreadableState { path: PathBuf, reason: String },

    /// Phase guard rejected an out-of-order terraform command.
    #[error("{command} requires the {required} phase (workflow is {current})")]
    PhaseNotReached {
        command: String,
        required: Phase,
        current: Phase,
    },

    /// Filesystem failure outside the state artifact (definition file,
    /// working directory, phase marker).
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl Error {
    /// Attach context to a raw I/O error.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
