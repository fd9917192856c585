//! `cygdep islands` command implementation.

use colored::Colorize;
use cygdep::Error;

use super::Options;

/// Run the islands command.
pub fn run(opts: &Options) -> Result<(), Error> {
    let set = super::load(opts)?;
    super::warn_broken(&set);

    let islands = set.islands();
    if islands.is_empty() {
        println!("{}", "No dependency islands detected.".green());
        return Ok(());
    }

    println!(
        "Found {} island(s):",
        islands.len().to_string().yellow().bold()
    );
    println!();
    for island in &islands {
        println!("  {}", island.join(", "));
    }

    Ok(())
}
