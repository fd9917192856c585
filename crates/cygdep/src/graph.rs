//! The dependency graph representation.
//!
//! [`DepGraph`] is an explicit adjacency mapping from package name to an
//! ordered list of direct dependencies. It intentionally does *not*
//! auto-vivify entries: a package with no record is distinguishable from a
//! package with an empty dependency list ([`DepGraph::get`] vs
//! [`DepGraph::deps_or_empty`]), which keeps the "unknown package" branch
//! explicit throughout the query engine.
//!
//! Vertex enumeration order is first-seen insertion order, so results
//! derived from it (the `BASE` list, SCC output) are deterministic for a
//! given index.

use std::collections::HashMap;

/// Synthetic vertex whose out-edges are every package in the `Base`
/// category. Participates in all graph operations as an ordinary vertex.
pub const BASE: &str = "BASE";

/// A directed dependency graph over package names.
///
/// Not necessarily acyclic. Dependency lists may name vertices the graph
/// has no entry for; those surface as missing dependencies rather than
/// being filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepGraph {
    edges: HashMap<String, Vec<String>>,
    /// First-seen vertex order, parallel to `edges` keys.
    order: Vec<String>,
}

impl DepGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as a vertex with an empty dependency list, if it is
    /// not one already.
    pub fn ensure_vertex(&mut self, name: &str) {
        if !self.edges.contains_key(name) {
            self.edges.insert(name.to_string(), Vec::new());
            self.order.push(name.to_string());
        }
    }

    /// Set the dependency list of `name`, overwriting any prior value and
    /// registering the vertex if needed.
    pub fn set_deps(&mut self, name: &str, deps: Vec<String>) {
        self.ensure_vertex(name);
        if let Some(entry) = self.edges.get_mut(name) {
            *entry = deps;
        }
    }

    /// Append a single dependency to `name`'s list, registering the vertex
    /// if needed. Used for accumulating `BASE`'s list in first-seen order.
    pub fn push_dep(&mut self, name: &str, dep: &str) {
        self.ensure_vertex(name);
        if let Some(entry) = self.edges.get_mut(name) {
            entry.push(dep.to_string());
        }
    }

    /// Whether `name` is a vertex of this graph.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    /// The dependency list of `name`, or `None` if it is not a vertex.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.edges.get(name).map(Vec::as_slice)
    }

    /// The dependency list of `name`, or the empty slice if it is not a
    /// vertex. The explicit counterpart to a defaulting container.
    #[must_use]
    pub fn deps_or_empty(&self, name: &str) -> &[String] {
        self.get(name).unwrap_or(&[])
    }

    /// Vertices in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rewrite every dependency-list entry found in `alias` to its mapped
    /// replacement. Vertex names themselves are untouched.
    pub fn rewrite_deps(&mut self, alias: &HashMap<String, String>) {
        for deps in self.edges.values_mut() {
            for dep in deps.iter_mut() {
                if let Some(real) = alias.get(dep) {
                    real.clone_into(dep);
                }
            }
        }
    }

    /// Restrict the graph to the given vertices, in the given order.
    ///
    /// Each requested vertex gets this graph's dependency list for it, or
    /// an empty list if it has no entry here. Dependency targets are not
    /// filtered: an edge pointing outside the restricted set stays in the
    /// list and surfaces as a missing dependency.
    #[must_use]
    pub fn restrict(&self, vertices: &[String]) -> Self {
        let mut restricted = Self::new();
        for v in vertices {
            restricted.set_deps(v, self.deps_or_empty(v).to_vec());
        }
        restricted
    }

    /// The reverse graph over this graph's own vertex set: `q -> [p, ...]`
    /// for every edge `p -> q` whose target `q` is itself a vertex. Edges
    /// into non-vertices are dropped, so both graphs share one vertex set.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut rev = Self::new();
        for v in self.vertices() {
            rev.ensure_vertex(v);
        }
        for p in self.vertices() {
            for q in self.deps_or_empty(p) {
                if self.contains(q) {
                    rev.push_dep(q, p);
                }
            }
        }
        rev
    }
}
