use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// front-end provider outside `vue | react | svelte4 | svelte5`
    #[error("invalid provider: {0}")]
    UnknownProvider(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {origin}: at JSON path {path} → {message}")]
    Decode {
        origin: String,
        path: String,
        message: String,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob pattern matched no files: {0}")]
    NoInputMatched(String),
}
