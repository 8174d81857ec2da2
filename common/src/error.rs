use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeFileError>;

/// Failures while loading or saving a probe file. All of them end the run.
#[derive(Error, Debug)]
pub enum ProbeFileError {
    /// The input path is missing or is not a regular file.
    #[error("the file at {} was not found", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
