//! Parser for `setup.ini`-style package indexes.
//!
//! The index is line-oriented: blocks start with `@ <name>`, followed by
//! `keyword: value` lines. A `[prev]`/`[test]` tag starts a sub-block whose
//! keyword lines describe an older or test release; everything after such a
//! tag is ignored until the next `@` line, so only the primary record of
//! each package is consulted.
//!
//! Parsing never fails: malformed or unrecognized lines are skipped, which
//! matches how the index format has always been consumed in practice.

use std::collections::HashSet;

use tracing::trace;

use crate::graph::{DepGraph, BASE};

/// Index schema generation. Selects the dependency keyword and the list
/// separator; this is a configuration option, never auto-detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Schema {
    /// Early index generations: whitespace-separated `requires:` lists.
    Legacy,
    /// Current index generations: comma-separated `depends2:` lists.
    #[default]
    Modern,
}

impl Schema {
    fn depends_keyword(self) -> &'static str {
        match self {
            Self::Legacy => "requires",
            Self::Modern => "depends2",
        }
    }

    fn split_values(self, value: &str) -> Vec<String> {
        match self {
            Self::Legacy => value.split_whitespace().map(ToString::to_string).collect(),
            Self::Modern => value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Everything extracted from one package index.
#[derive(Debug, Clone)]
pub struct PackageIndex {
    /// Dependency graph of all packages, including the synthetic [`BASE`]
    /// vertex whose list is the `Base`-category packages in first-seen order.
    pub graph: DepGraph,
    /// `(provider, virtual name)` pairs in declaration order. Only the
    /// first name of each `provides:` list is recorded; resolution order
    /// matters when several packages provide the same virtual name.
    pub provides: Vec<(String, String)>,
    /// Names declared obsolete by some other package.
    pub obsoletes: HashSet<String>,
}

impl PackageIndex {
    fn new() -> Self {
        let mut graph = DepGraph::new();
        // BASE exists even for an index with no Base-category packages.
        graph.ensure_vertex(BASE);
        Self {
            graph,
            provides: Vec::new(),
            obsoletes: HashSet::new(),
        }
    }
}

impl Default for PackageIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser state carried from line to line: which package record is being
/// filled, and whether a sub-block tag has suppressed the rest of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ParserState {
    current: Option<String>,
    suppressed: bool,
}

/// Parse raw index text into a [`PackageIndex`].
///
/// Provided virtual names are *not* resolved here; run
/// [`crate::resolve_aliases`] on the result once the whole index is parsed,
/// since a provider may be declared after its consumers.
#[must_use]
pub fn parse_index(text: &str, schema: Schema) -> PackageIndex {
    let mut index = PackageIndex::new();
    let mut state = ParserState::default();
    for line in text.lines() {
        state = step(state, line, schema, &mut index);
    }
    index
}

/// Process one line: take the current state and the partial index, return
/// the state for the next line.
fn step(state: ParserState, line: &str, schema: Schema, index: &mut PackageIndex) -> ParserState {
    if let Some(name) = package_header(line) {
        index.graph.ensure_vertex(name);
        return ParserState {
            current: Some(name.to_string()),
            suppressed: false,
        };
    }

    if state.suppressed {
        return state;
    }

    if line.starts_with('[') {
        trace!(line, "sub-block tag, ignoring rest of record");
        return ParserState {
            suppressed: true,
            ..state
        };
    }

    let Some(name) = state.current.as_deref() else {
        return state;
    };
    let Some((keyword, value)) = line.split_once(':') else {
        return state;
    };
    let value = value.trim();

    if keyword == "category" {
        if value.split_whitespace().any(|word| word == "Base") {
            index.graph.push_dep(BASE, name);
        }
    } else if keyword == schema.depends_keyword() {
        index.graph.set_deps(name, schema.split_values(value));
    } else if keyword == "provides" {
        if let Some(first) = schema.split_values(value).into_iter().next() {
            record_provides(index, name, first);
        }
    } else if keyword == "obsoletes" {
        index.obsoletes.extend(schema.split_values(value));
    }

    state
}

/// Recognize a `@ <name>` block header; the name is the first
/// whitespace-delimited token after the `@`.
fn package_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('@')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace().next()
}

/// A repeated `provides:` line overwrites the record's earlier value, the
/// same way a repeated dependency line does.
fn record_provides(index: &mut PackageIndex, provider: &str, virtual_name: String) {
    if let Some(entry) = index.provides.iter_mut().find(|(p, _)| p == provider) {
        entry.1 = virtual_name;
    } else {
        index.provides.push((provider.to_string(), virtual_name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modern_comma_separated_dependencies() {
        let ini = "@ vim\ncategory: Editors\ndepends2: libncursesw10, vim-common , bash\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(
            index.graph.get("vim"),
            Some(
                &[
                    "libncursesw10".to_string(),
                    "vim-common".to_string(),
                    "bash".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn parses_legacy_whitespace_separated_dependencies() {
        let ini = "@ vim\nrequires: libncurses10 bash\n";
        let index = parse_index(ini, Schema::Legacy);

        assert_eq!(
            index.graph.get("vim"),
            Some(&["libncurses10".to_string(), "bash".to_string()][..])
        );
    }

    #[test]
    fn legacy_schema_ignores_modern_keyword_and_vice_versa() {
        let ini = "@ a\nrequires: b\ndepends2: c\n";

        let legacy = parse_index(ini, Schema::Legacy);
        assert_eq!(legacy.graph.get("a"), Some(&["b".to_string()][..]));

        let modern = parse_index(ini, Schema::Modern);
        assert_eq!(modern.graph.get("a"), Some(&["c".to_string()][..]));
    }

    #[test]
    fn package_with_no_dependency_line_gets_an_empty_list() {
        let ini = "@ standalone\ncategory: Utils\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(index.graph.get("standalone"), Some(&[][..]));
    }

    #[test]
    fn base_category_members_accumulate_in_first_seen_order() {
        let ini = "@ bash\ncategory: Base Shells\n@ vim\ncategory: Editors\n@ coreutils\ncategory: Base\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(
            index.graph.get(BASE),
            Some(&["bash".to_string(), "coreutils".to_string()][..])
        );
    }

    #[test]
    fn base_must_be_a_whole_word_in_the_category_list() {
        let ini = "@ db\ncategory: Database\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(index.graph.get(BASE), Some(&[][..]));
    }

    #[test]
    fn base_vertex_exists_even_for_an_empty_index() {
        let index = parse_index("", Schema::Modern);

        assert_eq!(index.graph.get(BASE), Some(&[][..]));
    }

    #[test]
    fn prev_sub_block_suppresses_keywords_until_next_package() {
        let ini = "@ vim\ndepends2: bash\n[prev]\ndepends2: oldbash\ncategory: Base\n@ emacs\ndepends2: gtk\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(index.graph.get("vim"), Some(&["bash".to_string()][..]));
        assert_eq!(index.graph.get("emacs"), Some(&["gtk".to_string()][..]));
        assert_eq!(index.graph.get(BASE), Some(&[][..]), "suppressed category line must not register");
    }

    #[test]
    fn test_sub_block_is_suppressed_too() {
        let ini = "@ gcc\ndepends2: binutils\n[test]\ndepends2: binutils-test\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(index.graph.get("gcc"), Some(&["binutils".to_string()][..]));
    }

    #[test]
    fn repeated_dependency_line_overwrites_the_earlier_one() {
        let ini = "@ a\ndepends2: b\ndepends2: c\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(index.graph.get("a"), Some(&["c".to_string()][..]));
    }

    #[test]
    fn provides_records_only_the_first_name() {
        let ini = "@ mta\nprovides: smtp-daemon, mail-transport\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(
            index.provides,
            vec![("mta".to_string(), "smtp-daemon".to_string())]
        );
    }

    #[test]
    fn obsoletes_union_across_packages() {
        let ini = "@ new-tool\nobsoletes: old-tool, older-tool\n@ shiny\nobsoletes: old-tool, dusty\n";
        let index = parse_index(ini, Schema::Modern);

        let expected: HashSet<String> = ["old-tool", "older-tool", "dusty"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(index.obsoletes, expected);
    }

    #[test]
    fn unrecognized_keywords_and_malformed_lines_are_skipped() {
        let ini = "@ pkg\nsdesc: \"a package\"\nversion: 1.2-1\nnot a keyword line\ndepends2: dep\n";
        let index = parse_index(ini, Schema::Modern);

        assert_eq!(index.graph.get("pkg"), Some(&["dep".to_string()][..]));
    }

    #[test]
    fn keyword_lines_before_any_package_are_ignored() {
        let ini = "release: cygwin\narch: x86_64\ndepends2: stray\n@ pkg\n";
        let index = parse_index(ini, Schema::Modern);

        // BASE plus pkg, nothing for the stray line.
        assert_eq!(index.graph.len(), 2);
        assert_eq!(index.graph.get("pkg"), Some(&[][..]));
    }

    #[test]
    fn bare_at_sign_is_not_a_package_header() {
        assert_eq!(package_header("@"), None);
        assert_eq!(package_header("@name-without-space"), None);
        assert_eq!(package_header("@ name trailing"), Some("name"));
        assert_eq!(package_header("@\tname"), Some("name"));
    }
}
