use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the preparation pipeline.
///
/// Anything that would leave the corpus in an inconsistent cross-file state
/// (a mismatched image/annotation pair, a half-written manifest) maps to a
/// variant here and aborts the run; per-item best-effort conditions are
/// logged and skipped at the call site instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to generate a unique file name after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("malformed annotation document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("failed to write annotation document {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image {} has no sibling annotation {}", image.display(), annotation.display())]
    MissingAnnotation { image: PathBuf, annotation: PathBuf },

    #[error("failed to decode image {}: {source}", path.display())]
    ImageDecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{context} ({}): {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            context,
            path: path.into(),
            source,
        }
    }
}
