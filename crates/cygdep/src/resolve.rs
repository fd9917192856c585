//! Resolution of provided virtual package names.
//!
//! A `provides:` declaration lets a concrete package satisfy dependencies
//! declared against a different (virtual) name. Resolution rewrites every
//! occurrence of a virtual name in any dependency list to the providing
//! package, and runs only after the whole index is parsed because a
//! provider may be declared after its consumers.

use std::collections::HashMap;

use tracing::warn;

use crate::index::PackageIndex;

/// Rewrite all virtual-name dependency entries to their providing package.
///
/// When several packages provide the same virtual name, the one declared
/// last in the index wins; a warning is logged since the index gives no
/// way to pick a better answer.
pub fn resolve_aliases(index: &mut PackageIndex) {
    let mut alias: HashMap<String, String> = HashMap::new();
    for (provider, virtual_name) in &index.provides {
        if let Some(prev) = alias.insert(virtual_name.clone(), provider.clone()) {
            if prev != *provider {
                warn!(
                    %virtual_name,
                    dropped = %prev,
                    kept = %provider,
                    "multiple providers for virtual package, keeping the last one declared"
                );
            }
        }
    }

    if alias.is_empty() {
        return;
    }
    index.graph.rewrite_deps(&alias);
}
