use std::path::{Path, PathBuf};

use crate::error::Error;

/// Recognized archive formats.
///
/// The set is closed: the kind selects both the listing and the
/// extraction command, so every variant maps to a known external-tool
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// gzip-compressed tarball (`.tar.gz`, `.tgz`).
    TarGz,
    /// bzip2-compressed tarball (`.tar.bz2`).
    TarBz2,
    /// zip archive (`.zip`).
    Zip,
}

impl ArchiveKind {
    /// Infer the kind from a file name.
    ///
    /// Precedence: `.tar.gz`/`.tgz`, then `.tar.bz2`, then `.zip`.
    fn from_name(name: &str) -> Option<Self> {
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar.bz2") {
            Some(Self::TarBz2)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }

    fn strip_suffix(self, name: &str) -> Option<&str> {
        match self {
            Self::TarGz => name
                .strip_suffix(".tar.gz")
                .or_else(|| name.strip_suffix(".tgz")),
            Self::TarBz2 => name.strip_suffix(".tar.bz2"),
            Self::Zip => name.strip_suffix(".zip"),
        }
    }
}

/// A source archive on disk: an existing file plus its inferred kind.
///
/// Immutable after construction. One `Archive` per invocation.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    kind: ArchiveKind,
}

impl Archive {
    /// Identify the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] if the path does not reference an
    /// existing file, or [`Error::UnknownFormat`] if the name ends in
    /// none of the recognized suffixes. Existence is checked first, so a
    /// missing file fails the same way regardless of its suffix.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let kind = ArchiveKind::from_name(name).ok_or_else(|| Error::UnknownFormat {
            path: path.display().to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }

    /// File name with the recognized suffix stripped, used as the
    /// fallback destination-folder name (`stuff.tar.gz` -> `stuff`).
    /// Degenerate names that are nothing but suffix get `_out` appended
    /// instead of collapsing to the empty string.
    pub(crate) fn stem(&self) -> String {
        let name = self.path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match self.kind.strip_suffix(name) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}_out", name),
        }
    }
}
