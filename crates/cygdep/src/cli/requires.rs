//! `cygdep requires` command implementation.

use cygdep::Error;

use super::Options;

/// Run the requires command.
pub fn run(opts: &Options, package: Option<&str>, recursive: bool) -> Result<(), Error> {
    let package = package.ok_or(Error::MissingArgument("requires"))?;

    let set = super::load(opts)?;
    super::warn_broken(&set);

    let packages = if recursive {
        set.recursive_requires(package)?
    } else {
        set.requires(package)?
    };
    super::print_packages(&packages, "(requires nothing)");

    Ok(())
}
