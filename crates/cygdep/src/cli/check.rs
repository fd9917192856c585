//! `cygdep check` command implementation.

use colored::Colorize;
use cygdep::Error;

use super::Options;

/// Run the check command. The broken-dependency findings are the result
/// here, so they go to stdout instead of being a stderr preamble.
pub fn run(opts: &Options) -> Result<(), Error> {
    let set = super::load(opts)?;

    let report = set.broken_report();
    if report.is_empty() {
        println!("{}", "No broken dependencies detected.".green());
        return Ok(());
    }

    if !report.missing.is_empty() {
        println!("{}", "Missing dependencies:".red().bold());
        for (package, missing) in &report.missing {
            println!("  {package} {} {}", "->".dimmed(), missing.join(", "));
        }
    }

    if !report.unknown.is_empty() {
        if !report.missing.is_empty() {
            println!();
        }
        println!("{}", "Unknown installed packages:".red().bold());
        for package in &report.unknown {
            println!("  {package}");
        }
    }

    Ok(())
}
