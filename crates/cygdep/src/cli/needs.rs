//! `cygdep needs` command implementation.

use cygdep::Error;

use super::Options;

/// Run the needs command.
pub fn run(opts: &Options, package: Option<&str>, recursive: bool) -> Result<(), Error> {
    let package = package.ok_or(Error::MissingArgument("needs"))?;

    let set = super::load(opts)?;
    super::warn_broken(&set);

    let packages = if recursive {
        set.recursive_needs(package)?
    } else {
        set.needs(package)?
    };
    super::print_packages(&packages, "(required by nothing)");

    Ok(())
}
