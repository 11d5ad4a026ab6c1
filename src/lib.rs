//! Archive extraction with destination inference.
//!
//! The crate wraps the system `tar` and `unzip` tools: it infers the
//! archive format from the file name, peeks at the archive's top-level
//! entries to pick a destination folder, then drives the external tool
//! and relays its progress output. Decompression itself never happens
//! in-process.

mod archive;
mod error;
mod exec;
mod extract;
mod inspect;

pub use archive::{Archive, ArchiveKind};
pub use error::Error;
pub use extract::unpack;
pub use inspect::{list_top_level, plan, ExtractionPlan, Options};

/// Convenience function: open, inspect, and unpack in one call.
pub fn unpack_file<P: AsRef<std::path::Path>>(
    source: P,
    destination: Option<&std::path::Path>,
    options: Options,
) -> Result<(), Error> {
    let archive = Archive::open(source)?;
    let top_level = list_top_level(&archive)?;
    let plan = inspect::plan(&archive, &top_level, destination, options)?;
    unpack(&archive, &plan, options)
}
