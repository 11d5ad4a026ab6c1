//! unz CLI - archive extraction with destination inference
//!
//! # Examples
//!
//! ```bash
//! # Extract next to the archive, inferring the folder name
//! unz project.tar.gz
//!
//! # Extract into a named folder
//! unz project.tar.gz build
//!
//! # Show per-entry progress
//! unz -v release.zip
//!
//! # Extract straight into the current directory
//! unz -S vendor.tar.bz2
//!
//! # Generate shell completions
//! unz --completions bash > ~/.bash_completion.d/unz
//! unz --completions zsh > ~/.zfunc/_unz
//! ```

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use unz::{Error, Options};

#[derive(Parser)]
#[command(
    name = "unz",
    about = "Extracts tar.gz, tar.bz2 and zip archives into a sensibly inferred folder",
    version,
    after_help = "EXAMPLES:
    unz project.tar.gz
    unz project.tar.gz build
    unz -v release.zip
    unz -S vendor.tar.bz2"
)]
struct Cli {
    /// Archive file to extract (.tar.gz, .tgz, .tar.bz2, .zip)
    #[arg(required_unless_present = "completions")]
    archive: Option<PathBuf>,

    /// Destination folder (created if missing; inferred from the archive
    /// contents when omitted)
    destination: Option<PathBuf>,

    /// Print each extracted entry
    #[arg(short, long)]
    verbose: bool,

    /// Disable the single-folder heuristic and extract into the current
    /// directory
    #[arg(short = 'S', long = "no-single")]
    no_single: bool,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle completions generation
    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "unz", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::from(exit_code(&e))
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let archive = cli.archive.as_ref().expect("archive is required");
    let options = Options {
        verbose: cli.verbose,
        single_dir: !cli.no_single,
    };
    unz::unpack_file(archive, cli.destination.as_deref(), options)
}

/// One exit code per failure class. Usage errors exit 2 through clap's
/// own convention.
fn exit_code(e: &Error) -> u8 {
    match e {
        Error::FileNotFound { .. } | Error::UnknownFormat { .. } => 1,
        Error::Io(_) => 3,
        Error::ToolNotFound { .. } => 4,
        Error::CommandFailed { .. } => 5,
        _ => 1,
    }
}
