/// Errors raised while loading an OBJ file
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ObjError>;

/// Coarse category of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidExtension,
    FileOpen,
    MalformedRecord,
    Read,
}

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("parse failed: {} does not end in .obj", path.display())]
    InvalidExtension { path: PathBuf },

    #[error("parse failed: cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse failed: line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("parse failed: error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ObjError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExtension { .. } => ErrorKind::InvalidExtension,
            Self::FileOpen { .. } => ErrorKind::FileOpen,
            Self::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            Self::Read { .. } => ErrorKind::Read,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
