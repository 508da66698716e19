use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the edges of the engine: parsing user input and loading data.
///
/// Scoring and ranking never fail; these only surface while turning text or
/// files into the typed values the engine consumes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown use case '{0}'")]
    UnknownUseCase(String),

    #[error("invalid hardware profile: {0}")]
    InvalidProfile(#[source] serde_json::Error),

    #[error("invalid model catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model selector cannot be empty")]
    EmptySelector,

    #[error("no model found matching '{0}'")]
    ModelNotFound(String),

    #[error("model selector '{selector}' is ambiguous. Matches: {matches}")]
    AmbiguousModel { selector: String, matches: String },
}

pub type Result<T> = std::result::Result<T, Error>;
