//! Domain-level error types.

use thiserror::Error;

/// Domain errors - outcomes of catalog use cases.
///
/// `NotFound` deliberately covers both "does not exist" and "exists but is
/// not visible to this caller" on the read path, so that the existence of
/// hidden posts never leaks.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post not found")]
    NotFound,

    #[error("operation not permitted")]
    Forbidden,

    #[error("could not derive a unique slug after {attempts} attempts")]
    SlugExhausted { attempts: u32 },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Repository-level errors.
///
/// Unique-constraint violations are reported distinctly so the slug
/// derivation retry loop can tell them apart from other failures.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}
