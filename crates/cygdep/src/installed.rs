//! Extraction of the installed-package list from a setup log.
//!
//! Cygwin's installer appends a `Dependency order of packages: ...` line
//! to `setup.log.full` listing every installed package. That single line
//! is all we consume; the rest of the log is ignored.

use crate::error::{Error, Result};

const MARKER: &str = "Dependency order of packages:";

/// Pull the installed-package names out of `setup.log.full` text.
///
/// # Errors
///
/// [`Error::InstalledLog`] if no marker line is present, which usually
/// means the log predates the installer versions that write one.
pub fn parse_setup_log(text: &str) -> Result<Vec<String>> {
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(MARKER) {
            return Ok(rest.split_whitespace().map(ToString::to_string).collect());
        }
    }
    Err(Error::InstalledLog(format!(
        "no `{MARKER}` line found"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_package_names_from_the_marker_line() {
        let log = "Starting cygwin install\nDependency order of packages: bash coreutils vim\ntrailer\n";

        let installed = parse_setup_log(log).unwrap();

        assert_eq!(installed, vec!["bash", "coreutils", "vim"]);
    }

    #[test]
    fn marker_must_start_the_line() {
        let log = "note: Dependency order of packages: bash\n";

        assert!(parse_setup_log(log).is_err());
    }

    #[test]
    fn missing_marker_is_an_error() {
        let err = parse_setup_log("just some log output\n").unwrap_err();

        assert!(matches!(err, Error::InstalledLog(_)));
        assert!(err.to_string().contains("Dependency order of packages"));
    }

    #[test]
    fn empty_package_list_is_allowed() {
        let installed = parse_setup_log("Dependency order of packages: \n").unwrap();

        assert!(installed.is_empty());
    }
}
