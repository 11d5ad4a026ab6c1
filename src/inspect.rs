//! Top-level listing and destination-folder inference.
//!
//! The destination policy is the heart of the tool: peek at the
//! archive's table of contents, and if everything already lives under
//! one top-level folder, let the extraction tool create that folder
//! itself. Otherwise invent a containing folder from the archive name
//! so entries never spray across the current directory.

use std::collections::BTreeSet;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::archive::{Archive, ArchiveKind};
use crate::error::Error;
use crate::exec::{self, Stream};

/// `tar tf` prints one path per line; capture everything up to and
/// including the first slash, or the whole name if there is none.
static TAR_FIRST_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^/]*/?)").unwrap());

/// `unzip -l` body lines are `size date time name`; skip the metadata
/// columns, then capture like the tar case. Header and summary lines
/// don't match the column shape and fall through.
static ZIP_FIRST_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s+\d+-\d+-\d+\s+\d+:\d+\s+([^/]*/?)").unwrap());

fn tar_segment(line: &str) -> Option<&str> {
    TAR_FIRST_SEGMENT
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn zip_segment(line: &str) -> Option<&str> {
    ZIP_FIRST_SEGMENT
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// List the distinct top-level entries of `archive` without extracting.
///
/// Directory names keep their trailing `/`. The set is ordered so the
/// single-entry case is deterministic.
///
/// A listing child that runs but fails (or prints nothing) yields an
/// empty set rather than an error; the extraction step that follows
/// performs the authoritative exit-status check.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] when the listing tool is missing
/// from `PATH`, or [`Error::Io`] on spawn and pipe faults.
pub fn list_top_level(archive: &Archive) -> Result<BTreeSet<String>, Error> {
    let mut entries = BTreeSet::new();
    let path = archive.path().as_os_str();

    match archive.kind() {
        ArchiveKind::TarGz | ArchiveKind::TarBz2 => {
            exec::run_streaming("tar", [OsStr::new("tf"), path], Stream::Stdout, |line| {
                if let Some(segment) = tar_segment(line) {
                    entries.insert(segment.to_string());
                }
                Ok(())
            })?;
        }
        ArchiveKind::Zip => {
            exec::run_streaming("unzip", [OsStr::new("-l"), path], Stream::Stdout, |line| {
                if let Some(segment) = zip_segment(line) {
                    entries.insert(segment.to_string());
                }
                Ok(())
            })?;
        }
    }

    Ok(entries)
}

/// Immutable per-run configuration, passed by parameter everywhere.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Print per-entry progress while unpacking.
    pub verbose: bool,
    /// Apply the "one containing folder" heuristic. `false` (the
    /// `--no-single` flag) extracts straight into the current
    /// directory.
    pub single_dir: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: false,
            single_dir: true,
        }
    }
}

/// Where to unpack, and who creates the folder.
///
/// Computed once per run and consumed immediately by
/// [`unpack`](crate::unpack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPlan {
    /// Destination folder.
    pub target: PathBuf,
    /// The extraction tool creates `target` itself because it is the
    /// archive's only top-level entry. The wrapper must not pre-create
    /// it, and passes the current directory as the extraction root.
    pub implicit_cwd: bool,
}

/// Compute the extraction plan for `archive`.
///
/// Policy, in priority order:
/// 1. heuristic disabled: the current directory, as a real
///    pre-existing destination;
/// 2. explicit `destination`: taken verbatim;
/// 3. exactly one top-level entry: that entry (made absolute), created
///    implicitly by the tool;
/// 4. otherwise: the archive name with its suffix stripped (made
///    absolute).
///
/// # Errors
///
/// Returns [`Error::Io`] only when the current directory cannot be
/// resolved.
pub fn plan(
    archive: &Archive,
    top_level: &BTreeSet<String>,
    destination: Option<&Path>,
    options: Options,
) -> Result<ExtractionPlan, Error> {
    if !options.single_dir {
        return Ok(ExtractionPlan {
            target: env::current_dir()?,
            implicit_cwd: false,
        });
    }

    if let Some(destination) = destination {
        return Ok(ExtractionPlan {
            target: destination.to_path_buf(),
            implicit_cwd: false,
        });
    }

    match top_level.first() {
        Some(entry) if top_level.len() == 1 => Ok(ExtractionPlan {
            target: env::current_dir()?.join(entry.trim_end_matches('/')),
            implicit_cwd: true,
        }),
        _ => Ok(ExtractionPlan {
            target: env::current_dir()?.join(archive.stem()),
            implicit_cwd: false,
        }),
    }
}
