use crate::backend::BackendKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no suitable backend comparison method found (tried: {})", join_kinds(.tried))]
    NoBackend { tried: Vec<BackendKind> },

    #[error("unorderable types: {left}, {right}")]
    TypeMismatch { left: &'static str, right: &'static str },

    #[error("no candidate versions to choose from")]
    NoCandidates,

    #[error("{backend} cannot compare versions: {message}")]
    Malformed { backend: BackendKind, message: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{0}")]
    Definition(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_kinds(kinds: &[BackendKind]) -> String {
    kinds.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
