use std::path::PathBuf;

/// Convenience result type used across transpeg.
pub type TranspegResult<T> = Result<T, TranspegError>;

/// Top-level error taxonomy used by the conversion pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TranspegError {
    /// The input path does not exist.
    #[error("File not found: '{}'", .0.display())]
    InputNotFound(PathBuf),

    /// The input bytes do not look like any image format the codec supports.
    #[error("Unknown format: '{}'", .0.display())]
    UnrecognizedFormat(PathBuf),

    /// The input exists but could not be read.
    #[error("Could not read the image: '{}'", path.display())]
    InputRead {
        /// Offending input path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The input format was recognized but the pixel data is corrupt or truncated.
    #[error("Could not read the image: '{}'", path.display())]
    InputDecode {
        /// Offending input path.
        path: PathBuf,
        /// Underlying codec failure.
        #[source]
        source: image::ImageError,
    },

    /// The output path could not be created or written.
    #[error("Could not write the image: '{}'", path.display())]
    OutputWrite {
        /// Offending output path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Invalid user-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A layer or the document could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TranspegError {
    /// Build a [`TranspegError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TranspegError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Process exit status the CLI reports for this error.
    ///
    /// Usage problems exit with 2 (the same status `clap` uses for bad arguments);
    /// every other failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
