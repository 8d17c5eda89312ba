use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mortimer operations
#[derive(Error, Diagnostic, Debug)]
pub enum MortimerError {
    #[error("IO error: {0}")]
    #[diagnostic(code(mortimer::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mortimer::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(mortimer::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(mortimer::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The slab cannot be tiled: bad dimensions or an unsupported pixel format.
    #[error("Input rejected: {message}")]
    #[diagnostic(code(mortimer::input))]
    InputFormat {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// More distinct tiles than a one-byte index can address.
    #[error("Too many distinct tiles: the map format addresses at most {limit}")]
    #[diagnostic(code(mortimer::capacity))]
    CapacityExceeded {
        limit: usize,
        #[help]
        help: Option<String>,
    },

    /// A broken invariant. Always a bug, never a user error.
    #[error("Internal consistency error: {message}")]
    #[diagnostic(code(mortimer::internal))]
    InternalConsistency { message: String },
}

impl MortimerError {
    pub(crate) fn input(message: impl Into<String>, help: impl Into<String>) -> Self {
        MortimerError::InputFormat {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        MortimerError::InternalConsistency {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortimerError>;
