//! cygdep CLI - dependency questions from the command line.
//!
//! cygdep reads a `setup.ini`-style package index plus the installed
//! package list and answers dependency queries: requires, needs, leaves,
//! islands, cycles, and a broken-dependency check.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use cygdep::Schema;
use tracing_subscriber::EnvFilter;

mod cli;

/// cygdep: dependency queries over a Cygwin-style package repository.
#[derive(Parser)]
#[command(name = "cygdep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the setup.ini package index
    #[arg(short, long, value_name = "FILE")]
    inifile: PathBuf,

    /// Path to the installer log naming the installed packages
    #[arg(
        long,
        value_name = "FILE",
        default_value = "/var/log/setup.log.full"
    )]
    installed: PathBuf,

    /// Index schema generation (selects the dependency keyword and list separator)
    #[arg(long, value_enum, default_value_t = SchemaArg::Modern)]
    schema: SchemaArg,

    /// Operate over every package in the index, not just installed ones
    #[arg(short, long)]
    all: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the packages PACKAGE requires
    Requires {
        /// Package name
        package: Option<String>,

        /// Include transitive requirements, not just direct ones
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print the packages that require PACKAGE
    Needs {
        /// Package name
        package: Option<String>,

        /// Include transitive dependents, not just direct ones
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print installed packages that nothing else depends on
    Leaves,

    /// Print dependency cycles that no outside package depends into
    Islands,

    /// Print all dependency cycles
    Cycles,

    /// Report missing and unknown dependencies
    Check,
}

/// CLI-facing spelling of the index schema generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaArg {
    /// Whitespace-separated `requires:` lists
    Legacy,
    /// Comma-separated `depends2:` lists
    Modern,
}

impl From<SchemaArg> for Schema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Legacy => Schema::Legacy,
            SchemaArg::Modern => Schema::Modern,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let opts = cli::Options {
        inifile: cli.inifile,
        installed: cli.installed,
        schema: cli.schema.into(),
        all: cli.all,
    };

    let result = match cli.command {
        Commands::Requires { package, recursive } => {
            cli::requires::run(&opts, package.as_deref(), recursive)
        }
        Commands::Needs { package, recursive } => {
            cli::needs::run(&opts, package.as_deref(), recursive)
        }
        Commands::Leaves => cli::leaves::run(&opts),
        Commands::Islands => cli::islands::run(&opts),
        Commands::Cycles => cli::cycles::run(&opts),
        Commands::Check => cli::check::run(&opts),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
