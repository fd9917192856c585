//! `cygdep leaves` command implementation.

use cygdep::Error;

use super::Options;

/// Run the leaves command.
pub fn run(opts: &Options) -> Result<(), Error> {
    let set = super::load(opts)?;
    super::warn_broken(&set);

    super::print_packages(&set.leaves(), "(no leaves)");

    Ok(())
}
