//! Error types for cygdep operations.
//!
//! Broken-dependency findings are deliberately *not* errors: they are a
//! diagnostic result (see [`crate::BrokenReport`]) and are reported as
//! warnings by the CLI. Only conditions that make the requested query
//! unanswerable surface here.

use std::io;
use thiserror::Error;

/// The error type for cygdep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The queried package is not in the current package set.
    #[error("package not found: {0}")]
    NotFound(String),

    /// A package-scoped query was selected without a target package.
    #[error("PACKAGE must be specified for `{0}`")]
    MissingArgument(&'static str),

    /// Transitive-closure computation hit an edge to a vertex with no
    /// graph entry. Unlike the broken-dependency report, this is fatal:
    /// silently omitting the package would misreport the closure.
    #[error("dependency graph is inconsistent: no entry for {0}")]
    Inconsistent(String),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The installed-package log could not be interpreted.
    #[error("installed-package log: {0}")]
    InstalledLog(String),
}

/// A specialized Result type for cygdep operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_package() {
        let err = Error::NotFound("libfoo1".to_string());
        assert!(err.to_string().contains("libfoo1"));
    }

    #[test]
    fn missing_argument_names_the_query() {
        let err = Error::MissingArgument("requires");
        assert!(err.to_string().contains("requires"));
        assert!(err.to_string().contains("PACKAGE"));
    }

    #[test]
    fn inconsistent_names_the_offending_vertex() {
        let err = Error::Inconsistent("ghost-pkg".to_string());
        assert!(err.to_string().contains("ghost-pkg"));
    }
}
