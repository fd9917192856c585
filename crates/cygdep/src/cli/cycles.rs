//! `cygdep cycles` command implementation.

use colored::Colorize;
use cygdep::Error;

use super::Options;

/// Run the cycles command.
pub fn run(opts: &Options) -> Result<(), Error> {
    let set = super::load(opts)?;
    super::warn_broken(&set);

    let cycles = set.all_cycles();
    if cycles.is_empty() {
        println!("{}", "No circular dependencies detected.".green());
        return Ok(());
    }

    println!(
        "Found {} circular dependency group(s):",
        cycles.len().to_string().red().bold()
    );
    println!();
    for cycle in &cycles {
        println!("  {}", cycle.join(", "));
    }

    Ok(())
}
