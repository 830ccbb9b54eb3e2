use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// File-level failures. Both end the loop; per-line problems never surface here.
#[derive(Debug, Error)]
pub enum TailError {
    /// The live data file did not exist when the loop tried to open it.
    #[error("Live data file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// Any other I/O failure opening, seeking, or reading the live data file.
    #[error("Error reading from live data file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TailError {
    pub(crate) fn opening(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }
}
