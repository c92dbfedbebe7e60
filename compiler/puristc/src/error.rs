//! Failures of the driver itself. Problems in the parsed source are
//! diagnostics, not errors.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },

    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unknown option '{0}'")]
    UnknownFlag(String),

    #[error("invalid color mode '{0}' (expected auto, always or never)")]
    InvalidColor(String),

    #[error("unknown entry parser '{0}'")]
    UnknownEntry(String),

    #[error("unknown error code: {0}")]
    UnknownErrorCode(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),
}

impl DriverError {
    /// Classify an I/O failure while reading `path`.
    pub fn from_io(path: &str, error: io::Error) -> Self {
        let path = path.to_string();
        match error.kind() {
            io::ErrorKind::NotFound => DriverError::NotFound { path },
            io::ErrorKind::PermissionDenied => DriverError::PermissionDenied { path },
            io::ErrorKind::InvalidData => DriverError::InvalidUtf8 { path },
            _ => DriverError::Read {
                path,
                source: error,
            },
        }
    }
}
