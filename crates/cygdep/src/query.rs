//! The graph query engine.
//!
//! Every operation is a pure computation over an already-built
//! [`WorkingSet`]; there is no state carried between queries. Name lists
//! come back sorted lexicographically, and island/cycle groups are sorted
//! internally and ordered by their first member.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::graph::DepGraph;
use crate::scc;
use crate::working::WorkingSet;

/// The findings of a broken-dependency scan.
///
/// Never fatal by itself: the CLI reports it as warnings before other
/// query results, or as the result proper of the `check` query. Its
/// presence does mean closure-based answers are unreliable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokenReport {
    /// Per package, the dependency names absent from the vertex set,
    /// sorted; outer list sorted by package.
    pub missing: Vec<(String, Vec<String>)>,
    /// Installed package names with no record in the index at all.
    pub unknown: Vec<String>,
}

impl BrokenReport {
    /// Whether the scan found nothing wrong.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }
}

impl WorkingSet {
    /// The direct dependencies of `package`, sorted.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `package` is not in the vertex set.
    pub fn requires(&self, package: &str) -> Result<Vec<String>> {
        direct(self.graph(), package)
    }

    /// Every package reachable from `package` via one or more dependency
    /// edges, sorted. `package` itself appears only if a cycle leads back
    /// to it.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `package` is not in the vertex set;
    /// [`Error::Inconsistent`] if the closure walks an edge to a vertex
    /// with no entry, which unresolved missing dependencies cause. The
    /// query aborts rather than silently omitting the package.
    pub fn recursive_requires(&self, package: &str) -> Result<Vec<String>> {
        closure(self.graph(), package)
    }

    /// The packages that directly depend on `package`, sorted.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `package` is not in the vertex set.
    pub fn needs(&self, package: &str) -> Result<Vec<String>> {
        direct(self.reverse(), package)
    }

    /// Every package that directly or transitively depends on `package`,
    /// sorted.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `package` is not in the vertex set.
    pub fn recursive_needs(&self, package: &str) -> Result<Vec<String>> {
        closure(self.reverse(), package)
    }

    /// Installed packages nothing else depends on, sorted. `BASE` is not
    /// an installed package and never appears.
    #[must_use]
    pub fn leaves(&self) -> Vec<String> {
        let mut leaves: Vec<String> = self
            .members()
            .iter()
            .filter(|p| self.reverse().deps_or_empty(p).is_empty())
            .cloned()
            .collect();
        leaves.sort();
        leaves
    }

    /// Dependency cycles that no package outside the cycle depends into:
    /// strongly-connected components of size > 1 with no incoming
    /// cross-component edge.
    #[must_use]
    pub fn islands(&self) -> Vec<Vec<String>> {
        let components = scc::strongly_connected(self.graph());

        let component_of: HashMap<&str, usize> = components
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.iter().map(move |name| (name.as_str(), i)))
            .collect();
        let mut has_incoming = vec![false; components.len()];
        for (i, component) in components.iter().enumerate() {
            for u in component {
                for w in self.graph().deps_or_empty(u) {
                    if let Some(&j) = component_of.get(w.as_str()) {
                        if j != i {
                            has_incoming[j] = true;
                        }
                    }
                }
            }
        }

        let mut islands: Vec<Vec<String>> = components
            .into_iter()
            .enumerate()
            .filter(|(i, c)| c.len() > 1 && !has_incoming[*i])
            .map(|(_, mut c)| {
                c.sort();
                c
            })
            .collect();
        islands.sort();
        islands
    }

    /// All dependency cycles: every strongly-connected component of size
    /// greater than one, island or not.
    #[must_use]
    pub fn all_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = scc::strongly_connected(self.graph())
            .into_iter()
            .filter(|c| c.len() > 1)
            .map(|mut c| {
                c.sort();
                c
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Scan for broken dependencies: edges pointing outside the vertex
    /// set, and installed packages the index has never heard of.
    #[must_use]
    pub fn broken_report(&self) -> BrokenReport {
        let mut missing: Vec<(String, Vec<String>)> = Vec::new();
        for p in self.graph().vertices() {
            let mut absent: Vec<String> = self
                .graph()
                .deps_or_empty(p)
                .iter()
                .filter(|q| !self.graph().contains(q))
                .cloned()
                .collect();
            if !absent.is_empty() {
                absent.sort();
                absent.dedup();
                missing.push((p.to_string(), absent));
            }
        }
        missing.sort();

        BrokenReport {
            missing,
            unknown: self.unknown().to_vec(),
        }
    }
}

fn direct(graph: &DepGraph, package: &str) -> Result<Vec<String>> {
    let deps = graph
        .get(package)
        .ok_or_else(|| Error::NotFound(package.to_string()))?;
    let mut deps = deps.to_vec();
    deps.sort();
    deps.dedup();
    Ok(deps)
}

/// Transitive closure projected at `start`, via depth-first reachability.
fn closure(graph: &DepGraph, start: &str) -> Result<Vec<String>> {
    let first = graph
        .get(start)
        .ok_or_else(|| Error::NotFound(start.to_string()))?;

    let mut reached: BTreeSet<&str> = BTreeSet::new();
    let mut pending: Vec<&str> = first.iter().map(String::as_str).collect();
    while let Some(q) = pending.pop() {
        if reached.insert(q) {
            let deps = graph
                .get(q)
                .ok_or_else(|| Error::Inconsistent(q.to_string()))?;
            pending.extend(deps.iter().map(String::as_str));
        }
    }

    Ok(reached.into_iter().map(ToString::to_string).collect())
}
