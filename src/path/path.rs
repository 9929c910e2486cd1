use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path as StdPath, PathBuf};

use derive_more::{Deref, From, Into};
use snafu::{ResultExt, ensure};

use crate::error::{IoSnafu, NotADirectorySnafu, NotFoundSnafu, Result};
use crate::ext::SlashPathExt;

/// A filesystem path with listing and segment helpers on top of [`PathBuf`].
///
/// Everything `std::path::Path` offers is reachable through `Deref`. A value
/// never holds a handle and existence on disk is checked only by the
/// operations that touch the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, From, Into)]
pub struct Path(PathBuf);

impl Path {
    pub fn new(path: impl AsRef<StdPath>) -> Self {
        Self(path.as_ref().to_path_buf())
    }

    pub fn as_path(&self) -> &StdPath {
        self.0.as_path()
    }

    /// The segments of the path, the root anchor included, as lossy strings.
    pub fn parts(&self) -> Vec<String> {
        self.0
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect()
    }

    /// True if `part` is one of the segments. Whole segments only: `"fold"`
    /// is not contained in `a/folder/b`.
    pub fn contains(&self, part: impl AsRef<OsStr>) -> bool {
        let part = part.as_ref();
        self.0
            .components()
            .any(|component| component.as_os_str() == part)
    }

    pub fn has(&self, part: impl AsRef<OsStr>) -> bool {
        self.contains(part)
    }

    /// True if at least one of `parts` is a segment.
    pub fn has_any<I>(&self, parts: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        parts.into_iter().any(|part| self.contains(part))
    }

    /// True if every one of `parts` is a segment.
    pub fn has_all<I>(&self, parts: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        parts.into_iter().all(|part| self.contains(part))
    }

    /// Returns a copy with every segment equal to `old` replaced by `new`.
    pub fn change(&self, old: impl AsRef<OsStr>, new: impl AsRef<OsStr>) -> Self {
        let (old, new) = (old.as_ref(), new.as_ref());
        let changed = self
            .0
            .components()
            .map(|component| match component {
                Component::Normal(part) if part == old => new,
                other => other.as_os_str(),
            })
            .collect::<PathBuf>();
        Self(changed)
    }

    /// The path as a string with `/` separators.
    pub fn str(&self) -> String {
        self.0.to_slash_string()
    }

    /// Final segment, or an empty string when there is none (`/`, `..`).
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn join(&self, path: impl AsRef<StdPath>) -> Self {
        Self(self.0.join(path))
    }

    /// The containing directory; a bare name lives in `.`.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|parent| {
            if parent.as_os_str().is_empty() {
                Self::from(".")
            } else {
                Self::new(parent)
            }
        })
    }

    /// Replaces the file stem and keeps the extension.
    pub fn with_stem(&self, stem: impl AsRef<OsStr>) -> Self {
        let mut name = stem.as_ref().to_os_string();
        if let Some(extension) = self.0.extension() {
            name.push(".");
            name.push(extension);
        }
        Self(self.0.with_file_name(name))
    }

    pub fn is_folder(&self) -> bool {
        self.0.is_dir()
    }
}

impl AsRef<StdPath> for Path {
    fn as_ref(&self) -> &StdPath {
        self.0.as_path()
    }
}

impl AsRef<OsStr> for Path {
    fn as_ref(&self) -> &OsStr {
        self.0.as_os_str()
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Self(PathBuf::from(path))
    }
}

impl From<&StdPath> for Path {
    fn from(path: &StdPath) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.str())
    }
}

/// Metadata of `path` following symlinks, with a missing path reported as
/// `NotFound` rather than a bare I/O error.
pub(crate) fn stat(path: &StdPath) -> Result<fs::Metadata> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata),
        Err(error) if error.kind() == ErrorKind::NotFound => NotFoundSnafu { path }.fail(),
        Err(error) => Err(error).context(IoSnafu { path }),
    }
}

pub(crate) fn ensure_directory(path: &StdPath) -> Result<()> {
    let metadata = stat(path)?;
    ensure!(metadata.is_dir(), NotADirectorySnafu { path });
    Ok(())
}
