//! Construction of the working vertex set and its graphs.
//!
//! A [`WorkingSet`] restricts the full package graph to the vertices a
//! query should range over, either the installed packages plus [`BASE`]
//! or every package in the index, and carries the matching reverse graph.
//! Both graphs always share one vertex set.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::{DepGraph, BASE};
use crate::index::PackageIndex;

/// The restricted dependency graph, its reverse, and the package sets the
/// queries need. Built once per invocation and read-only afterwards.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    graph: DepGraph,
    reverse: DepGraph,
    /// Leaf-eligible packages: the vertex set minus `BASE`.
    members: Vec<String>,
    /// Installed packages that have no record in the index at all.
    /// Computed against the *original* installed list, so names added by
    /// the obsoletes extension never show up here.
    unknown: Vec<String>,
}

impl WorkingSet {
    /// Build the working set for an installed-packages query.
    ///
    /// The installed set is first extended by one (non-iterated) pass of
    /// obsoletes leniency: if installed `p` directly depends on an
    /// obsoleted name `q`, then `q` is treated as installed too, on the
    /// theory that whatever obsoletes `q` satisfies the dependency.
    #[must_use]
    pub fn installed(index: &PackageIndex, installed: &[String]) -> Self {
        let mut members: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for p in installed {
            if seen.insert(p.clone()) {
                members.push(p.clone());
            }
        }

        // One pass over the original list only; obsoletes chains are not
        // followed to a fixed point.
        for p in installed {
            for q in index.graph.deps_or_empty(p) {
                if index.obsoletes.contains(q) && seen.insert(q.clone()) {
                    debug!(package = %p, obsolete = %q, "treating obsoleted dependency as installed");
                    members.push(q.clone());
                }
            }
        }

        let mut vertices = members.clone();
        if !seen.contains(BASE) {
            vertices.push(BASE.to_string());
        }

        let graph = index.graph.restrict(&vertices);
        let reverse = graph.reverse();

        let mut unknown: Vec<String> = installed
            .iter()
            .filter(|p| !index.graph.contains(p))
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();

        Self {
            graph,
            reverse,
            members,
            unknown,
        }
    }

    /// Build the working set over every package in the index.
    #[must_use]
    pub fn all_packages(index: &PackageIndex) -> Self {
        let vertices: Vec<String> = index.graph.vertices().map(ToString::to_string).collect();
        let graph = index.graph.restrict(&vertices);
        let reverse = graph.reverse();
        let members = vertices.into_iter().filter(|v| v != BASE).collect();

        Self {
            graph,
            reverse,
            members,
            unknown: Vec::new(),
        }
    }

    /// The working dependency graph.
    #[must_use]
    pub fn graph(&self) -> &DepGraph {
        &self.graph
    }

    /// The reverse graph, over the same vertex set.
    #[must_use]
    pub fn reverse(&self) -> &DepGraph {
        &self.reverse
    }

    /// Packages eligible for membership queries (leaves), `BASE` excluded.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub(crate) fn unknown(&self) -> &[String] {
        &self.unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{parse_index, Schema};

    fn index(ini: &str) -> PackageIndex {
        parse_index(ini, Schema::Modern)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn installed_mode_restricts_to_installed_plus_base() {
        let idx = index("@ a\ndepends2: b\n@ b\ncategory: Base\n@ c\ndepends2: a\n");
        let set = WorkingSet::installed(&idx, &names(&["a", "b"]));

        assert!(set.graph().contains("a"));
        assert!(set.graph().contains("b"));
        assert!(set.graph().contains(BASE));
        assert!(!set.graph().contains("c"));
    }

    #[test]
    fn working_and_reverse_graphs_share_one_vertex_set() {
        let idx = index("@ a\ndepends2: b\n@ b\n");
        let set = WorkingSet::installed(&idx, &names(&["a", "b"]));

        let g: Vec<_> = set.graph().vertices().collect();
        let r: Vec<_> = set.reverse().vertices().collect();
        assert_eq!(g, r);
    }

    #[test]
    fn installed_but_unindexed_package_is_a_vertex_with_empty_deps() {
        let idx = index("@ a\n");
        let set = WorkingSet::installed(&idx, &names(&["a", "mystery"]));

        assert_eq!(set.graph().get("mystery"), Some(&[][..]));
        assert_eq!(set.unknown(), &["mystery".to_string()]);
    }

    #[test]
    fn obsoletes_extension_adds_one_layer_of_pseudo_installed() {
        let idx = index("@ a\ndepends2: old\n@ new\nobsoletes: old\n");
        let set = WorkingSet::installed(&idx, &names(&["a"]));

        assert!(set.graph().contains("old"), "obsoleted dependency joins the vertex set");
        assert!(set.members().contains(&"old".to_string()));
        assert!(
            set.unknown().is_empty(),
            "extension names are never reported unknown"
        );
    }

    #[test]
    fn obsoletes_extension_is_not_iterated_to_closure() {
        // a -> old1, old1 -> old2, both obsoleted. Only old1 is reachable
        // from the original installed list in one pass.
        let idx = index(
            "@ a\ndepends2: old1\n@ old1\ndepends2: old2\n@ n1\nobsoletes: old1\n@ n2\nobsoletes: old2\n",
        );
        let set = WorkingSet::installed(&idx, &names(&["a"]));

        assert!(set.graph().contains("old1"));
        assert!(!set.graph().contains("old2"));
    }

    #[test]
    fn duplicate_installed_entries_are_collapsed() {
        let idx = index("@ a\n");
        let set = WorkingSet::installed(&idx, &names(&["a", "a"]));

        assert_eq!(set.members(), &["a".to_string()]);
    }

    #[test]
    fn all_packages_mode_covers_every_index_vertex() {
        let idx = index("@ a\ndepends2: b\n@ b\ncategory: Base\n@ c\n");
        let set = WorkingSet::all_packages(&idx);

        for v in ["a", "b", "c", BASE] {
            assert!(set.graph().contains(v), "{v} missing");
        }
        assert!(!set.members().contains(&BASE.to_string()));
        assert!(set.unknown().is_empty());
    }
}
