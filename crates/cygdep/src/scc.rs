//! Strongly-connected components via iterative Tarjan.
//!
//! Components are emitted in reverse topological order of the condensation:
//! index 0 is a sink component with no outgoing inter-component edges, and
//! every cross-component edge points from a later component to an earlier
//! one. Island detection in the query engine relies on that ordering
//! property holding, though it only needs "cross edges never stay inside a
//! component".

use std::collections::HashMap;

use crate::graph::DepGraph;

const UNVISITED: usize = usize::MAX;

/// Compute the strongly-connected components of `graph`.
///
/// Dependency entries naming non-vertices are skipped; a missing package
/// cannot participate in a cycle. DFS roots are taken in the graph's
/// first-seen vertex order, so output is deterministic for a given input.
#[must_use]
pub fn strongly_connected(graph: &DepGraph) -> Vec<Vec<String>> {
    let names: Vec<&str> = graph.vertices().collect();
    let ids: HashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    let adj: Vec<Vec<usize>> = names
        .iter()
        .map(|n| {
            graph
                .deps_or_empty(n)
                .iter()
                .filter_map(|d| ids.get(d.as_str()).copied())
                .collect()
        })
        .collect();

    let n = names.len();
    let mut visit_index = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0usize;
    let mut components: Vec<Vec<String>> = Vec::new();

    // Explicit call stack of (vertex, next-edge cursor); recursion depth
    // would otherwise track the longest dependency chain in the index.
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visit_index[root] != UNVISITED {
            continue;
        }
        visit_index[root] = next_index;
        low[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            let cursor = frame.1;
            frame.1 += 1;

            if let Some(&w) = adj[v].get(cursor) {
                if visit_index[w] == UNVISITED {
                    visit_index[w] = next_index;
                    low[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    frames.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(visit_index[w]);
                }
            } else {
                frames.pop();
                if let Some(parent) = frames.last() {
                    let u = parent.0;
                    low[u] = low[u].min(low[v]);
                }
                if low[v] == visit_index[v] {
                    let mut component = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        component.push(names[w].to_string());
                        if w == v {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }
    }

    components
}
