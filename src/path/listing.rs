use std::fs;
use std::io::ErrorKind;
use std::path::{Path as StdPath, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::collections::CountedList;
use crate::error::{PathError, Result};
use crate::ext::SlashPathExt;
use crate::path::path::ensure_directory;
use crate::path::Path;

/// Controls what [`Path::list`] walks and what it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Levels to descend, `Some(1)` for immediate entries only, `None` for no limit.
    pub max_depth: Option<usize>,
    /// Keep only entries whose file name ends with this.
    pub suffix: Option<String>,
    /// Keep only entries whose full path contains this.
    pub pattern: Option<String>,
    /// Return directories as entries, not just walk through them.
    pub include_dirs: bool,
    /// Ignore dot-entries and do not descend into dot-directories.
    pub skip_hidden: bool,
}

impl ListOptions {
    /// Immediate entries, directories included.
    pub fn shallow() -> Self {
        Self {
            max_depth: Some(1),
            include_dirs: true,
            ..Self::default()
        }
    }

    /// Every file below the root, directories walked but not returned.
    pub fn recursive() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_suffix(mut self, suffix: Option<impl Into<String>>) -> Self {
        self.suffix = suffix.map(Into::into);
        self
    }

    pub fn with_pattern(mut self, pattern: Option<impl Into<String>>) -> Self {
        self.pattern = pattern.map(Into::into);
        self
    }

    pub fn with_dirs(mut self, include_dirs: bool) -> Self {
        self.include_dirs = include_dirs;
        self
    }

    pub fn with_hidden_skipped(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    fn keeps(&self, path: &StdPath, name: &str) -> bool {
        let suffix_ok = self
            .suffix
            .as_deref()
            .is_none_or(|suffix| name.ends_with(suffix));
        let pattern_ok = self
            .pattern
            .as_deref()
            .is_none_or(|pattern| path.to_slash_string().contains(pattern));
        suffix_ok && pattern_ok
    }
}

impl Path {
    /// Lists the immediate entries of this directory in the order the
    /// platform enumerates them.
    ///
    /// Fails with `NotFound` if the path does not exist and with
    /// `NotADirectory` if it is not a directory.
    pub fn ls(&self) -> Result<CountedList<Path>> {
        self.list(&ListOptions::shallow())
    }

    /// Lists every file below this directory, optionally keeping only names
    /// ending with `suffix`. Directories are descended into but not returned.
    pub fn rls(&self, suffix: Option<&str>) -> Result<CountedList<Path>> {
        self.list(&ListOptions::recursive().with_suffix(suffix))
    }

    /// Walks this directory depth-first according to `options`.
    ///
    /// Symlinked directories are followed; a link that leads back to one of
    /// its ancestors aborts the walk with an `Io` error, and so does any
    /// unreadable directory. Dangling links are listed as plain entries.
    pub fn list(&self, options: &ListOptions) -> Result<CountedList<Path>> {
        ensure_directory(self)?;
        debug!("Listing {} with {:?}", self, options);

        // depth 0 is the root itself, which is never listed or filtered
        let mut walker = WalkDir::new(self.as_path()).follow_links(true);
        if let Some(max_depth) = options.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut entries = CountedList::new();
        let walk = walker.into_iter().filter_entry(|entry| {
            entry.depth() == 0 || !(options.skip_hidden && is_hidden(entry))
        });
        for entry in walk {
            let (path, is_dir) = match entry {
                Ok(entry) if entry.depth() == 0 => continue,
                Ok(entry) => {
                    let is_dir = entry.file_type().is_dir();
                    if is_dir {
                        trace!("Entering {}", entry.path().display());
                    }
                    (entry.into_path(), is_dir)
                }
                Err(error) => match dangling_link(&error) {
                    Some(path) => (path, false),
                    None => return Err(PathError::from_walk(self, error)),
                },
            };

            let Some(file_name) = path.file_name() else {
                continue;
            };
            if file_name.to_str().is_none() {
                warn!("Entry name is not valid UTF-8: {}", path.display());
            }
            let name = file_name.to_string_lossy();

            if (options.include_dirs || !is_dir) && options.keeps(&path, &name) {
                entries.push(Path::from(path));
            }
        }

        debug!("Listed {} entries under {}", entries.n(), self);
        Ok(entries)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// A symlink whose target is gone, which the walker reports as an error.
pub(crate) fn dangling_link(error: &walkdir::Error) -> Option<PathBuf> {
    let path = error.path()?;
    let missing = error
        .io_error()
        .is_some_and(|source| source.kind() == ErrorKind::NotFound);
    let is_link = fs::symlink_metadata(path)
        .is_ok_and(|metadata| metadata.file_type().is_symlink());
    (missing && is_link).then(|| path.to_path_buf())
}
