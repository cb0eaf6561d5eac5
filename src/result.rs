use thiserror::Error;

/// Failure raised by a [`crate::ViewResolver`] when a path maps to no handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no handler is registered for path `{path}`")]
    NotFound { path: String },
}

/// Errors that can be produced while running a request through the chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("hijacked redirect could not be dispatched: {0}")]
    Resolve(#[from] ResolveError),
    #[error("hijacked redirect to `{location}` requires a view resolver")]
    MissingResolver { location: String },
}

impl ChainError {
    /// Whether the failure belongs to the not-found class (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChainError::Resolve(ResolveError::NotFound { .. }))
    }
}
