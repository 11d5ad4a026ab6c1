//! External-command construction and progress relaying.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::ExitStatus;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::archive::{Archive, ArchiveKind};
use crate::error::Error;
use crate::exec::{self, Stream};
use crate::inspect::{ExtractionPlan, Options};

/// `unzip` per-entry progress lines; capture 2 is the path.
static ZIP_PROGRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(extracting|inflating):\s+(.*?)\s*$").unwrap());

/// Verbose tar lines carry a fixed 2-byte `x ` prefix before the path.
fn tar_progress(line: &str) -> Option<&str> {
    line.get(2..)
}

fn zip_progress(line: &str) -> Option<&str> {
    ZIP_PROGRESS
        .captures(line)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
}

/// Run the extraction command for `archive` according to `plan`.
///
/// The destination is created first unless the tool itself will create
/// it (the single-top-level-folder case, where the extraction root is
/// the current directory instead). Creation is idempotent, so an
/// already-existing destination, notably the current directory under
/// `--no-single`, is fine.
///
/// When verbose, per-entry progress goes to stdout; the tool's
/// diagnostics are forwarded to stderr either way.
///
/// # Errors
///
/// Returns [`Error::Io`] when the destination cannot be created or a
/// pipe fails, [`Error::ToolNotFound`] when the extraction tool is
/// missing from `PATH`, and [`Error::CommandFailed`] when the tool
/// exits with a failure status.
pub fn unpack(archive: &Archive, plan: &ExtractionPlan, options: Options) -> Result<(), Error> {
    if !plan.implicit_cwd {
        fs::create_dir_all(&plan.target)?;
    }

    if options.verbose {
        let label = match archive.kind() {
            ArchiveKind::Zip => "zip",
            _ => "tar",
        };
        println!("Unpacking {} into {}", label, plan.target.display());
    }

    let root = if plan.implicit_cwd {
        Path::new(".")
    } else {
        plan.target.as_path()
    };

    let (program, status) = match archive.kind() {
        ArchiveKind::TarGz => ("tar", run_tar(archive, root, options, 'z')?),
        ArchiveKind::TarBz2 => ("tar", run_tar(archive, root, options, 'j')?),
        ArchiveKind::Zip => ("unzip", run_unzip(archive, root, options)?),
    };

    if !status.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            code: status.code(),
        });
    }
    Ok(())
}

fn run_tar(
    archive: &Archive,
    root: &Path,
    options: Options,
    mode: char,
) -> Result<ExitStatus, Error> {
    let mut flags = format!("x{}", mode);
    if options.verbose {
        flags.push('v');
    }

    let args: Vec<OsString> = vec![
        flags.into(),
        "-C".into(),
        root.into(),
        "-f".into(),
        archive.path().into(),
    ];

    exec::run_streaming("tar", args, Stream::Stderr, |line| {
        if options.verbose {
            if let Some(name) = tar_progress(line) {
                println!("{}", name);
            }
        }
        Ok(())
    })
}

fn run_unzip(archive: &Archive, root: &Path, options: Options) -> Result<ExitStatus, Error> {
    let args: Vec<OsString> = vec![
        "-o".into(),
        "-d".into(),
        root.into(),
        archive.path().into(),
    ];

    exec::run_streaming("unzip", args, Stream::Stdout, |line| {
        if options.verbose {
            if let Some(name) = zip_progress(line) {
                println!("{}", name);
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_progress_filter() {
        assert_eq!(
            zip_progress("  inflating: foo/bar.txt  "),
            Some("foo/bar.txt")
        );
        assert_eq!(
            zip_progress(" extracting: empty.dat"),
            Some("empty.dat")
        );
        assert_eq!(zip_progress("Archive:  stuff.zip"), None);
        assert_eq!(zip_progress("   creating: foo/"), None);
        assert_eq!(zip_progress(""), None);
    }

    #[test]
    fn test_tar_progress_strips_prefix() {
        assert_eq!(tar_progress("x project/main.rs"), Some("project/main.rs"));
        assert_eq!(tar_progress("x "), Some(""));
        assert_eq!(tar_progress("x"), None);
    }
}
