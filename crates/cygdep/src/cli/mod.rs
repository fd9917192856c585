//! CLI command implementations.

pub mod check;
pub mod cycles;
pub mod islands;
pub mod leaves;
pub mod needs;
pub mod requires;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use cygdep::{parse_index, parse_setup_log, resolve_aliases, Error, Schema, WorkingSet};
use tracing::debug;

/// Shared command options resolved from the top-level arguments.
pub struct Options {
    /// Path to the setup.ini package index.
    pub inifile: PathBuf,
    /// Path to the installer log naming the installed packages.
    pub installed: PathBuf,
    /// Index schema generation.
    pub schema: Schema,
    /// Operate over every package in the index instead of installed ones.
    pub all: bool,
}

/// Run the parse → resolve → build pipeline for the selected mode.
pub fn load(opts: &Options) -> Result<WorkingSet, Error> {
    let text = read_file(&opts.inifile)?;
    let mut index = parse_index(&text, opts.schema);
    resolve_aliases(&mut index);
    debug!(packages = index.graph.len(), "parsed package index");

    if opts.all {
        return Ok(WorkingSet::all_packages(&index));
    }

    let log = read_file(&opts.installed)?;
    let installed = parse_setup_log(&log)?;
    debug!(installed = installed.len(), "read installed package list");
    Ok(WorkingSet::installed(&index, &installed))
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path)
        .map_err(|e| Error::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display()))))
}

/// Report broken-dependency findings as warnings ahead of a query result.
///
/// Missing or unknown dependencies do not abort the query, but any answer
/// computed over such a graph deserves suspicion.
pub fn warn_broken(set: &WorkingSet) {
    let report = set.broken_report();
    if report.is_empty() {
        return;
    }

    let tag = "warning".yellow().bold();
    for (package, missing) in &report.missing {
        eprintln!(
            "{tag}: {package} requires missing package(s): {}",
            missing.join(", ")
        );
    }
    for package in &report.unknown {
        eprintln!("{tag}: installed package {package} is not in the index");
    }
    eprintln!("{tag}: results that follow may be unreliable");
    eprintln!();
}

/// Print package names one per line, or a placeholder for an empty list.
pub fn print_packages(packages: &[String], empty_message: &str) {
    if packages.is_empty() {
        println!("{}", empty_message.dimmed());
        return;
    }
    for name in packages {
        println!("{name}");
    }
}
