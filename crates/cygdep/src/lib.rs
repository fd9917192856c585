//! # cygdep: dependency queries over a Cygwin-style package repository
//!
//! cygdep parses a `setup.ini`-style package index into a directed
//! dependency graph, resolves provides/obsoletes aliasing, and answers
//! queries over it: direct and transitive requirements, reverse
//! dependencies, leaves, dependency islands, and broken-dependency
//! reports. It is a library first and a CLI second.
//!
//! ## Pipeline
//!
//! raw index text → [`parse_index`] → [`resolve_aliases`] →
//! [`WorkingSet::installed`] / [`WorkingSet::all_packages`] → queries.
//!
//! All structures are built once per invocation from immutable input and
//! are read-only afterwards; every query is a pure computation.
//!
//! ## Quick Start
//!
//! ```
//! use cygdep::{parse_index, resolve_aliases, Schema, WorkingSet};
//!
//! let ini = "@ vim\ndepends2: bash\n@ bash\ncategory: Base\n";
//! let mut index = parse_index(ini, Schema::Modern);
//! resolve_aliases(&mut index);
//!
//! let installed = vec!["vim".to_string(), "bash".to_string()];
//! let set = WorkingSet::installed(&index, &installed);
//!
//! assert_eq!(set.requires("vim")?, vec!["bash"]);
//! assert_eq!(set.leaves(), vec!["vim"]);
//! # Ok::<(), cygdep::Error>(())
//! ```

mod error;
mod graph;
mod index;
mod installed;
mod query;
mod resolve;
mod scc;
mod working;

pub use error::{Error, Result};
pub use graph::{DepGraph, BASE};
pub use index::{parse_index, PackageIndex, Schema};
pub use installed::parse_setup_log;
pub use query::BrokenReport;
pub use resolve::resolve_aliases;
pub use working::WorkingSet;
