use std::path::PathBuf;

/// Errors raised while converting a single markdown document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed {kind} syntax near {snippet:?}")]
    MalformedInline { kind: &'static str, snippet: String },
    #[error("unbalanced `{delimiter}` delimiter in {text:?}")]
    UnbalancedDelimiter {
        delimiter: &'static str,
        text: String,
    },
    #[error("no level-1 heading found")]
    MissingHeader,
    #[error("structural invariant violated: {0}")]
    StructuralInvariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling a site on disk.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to generate page from {path}: {source}")]
    Page {
        path: PathBuf,
        #[source]
        source: Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> SiteError {
        let path = path.into();
        move |source| SiteError::Io { path, source }
    }
}
