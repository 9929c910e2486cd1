use std::fs;
use std::io::ErrorKind;
use std::path::{Path as StdPath, PathBuf};

use snafu::{ResultExt, ensure};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{IoSnafu, IsADirectorySnafu, PathError, Result};
use crate::path::path::stat;
use crate::path::Path;

impl Path {
    /// Copies this file or directory to `dst` and returns where it landed.
    ///
    /// A file copied onto an existing directory is placed inside it.
    /// Directories need `recursive` and are copied to `dst` itself, which must
    /// not exist yet.
    pub fn cp(&self, dst: impl AsRef<StdPath>, recursive: bool) -> Result<Path> {
        let dst = dst.as_ref();
        if stat(self)?.is_dir() {
            ensure!(recursive, IsADirectorySnafu { path: self.as_path() });
            copy_tree(self, dst)?;
            debug!("Copied directory {} to {}", self, dst.display());
            return Ok(Path::new(dst));
        }

        let target = target_inside(self, dst);
        fs::copy(self, &target).context(IoSnafu { path: &target })?;
        debug!("Copied {} to {}", self, target.display());
        Ok(Path::new(target))
    }

    /// Moves this file or directory to `dst` and returns where it landed.
    ///
    /// When `dst` is an existing directory the entry is moved inside it.
    pub fn mv(&self, dst: impl AsRef<StdPath>) -> Result<Path> {
        stat(self)?;
        let target = target_inside(self, dst.as_ref());

        match fs::rename(self, &target) {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::CrossesDevices => {
                info!(
                    "Cannot rename {} across devices, copying instead",
                    self
                );
                self.cp(&target, true)?;
                self.rm(true)?;
            }
            Err(error) => return Err(error).context(IoSnafu { path: self.as_path() }),
        }

        debug!("Moved {} to {}", self, target.display());
        Ok(Path::new(target))
    }

    /// Removes this file or directory.
    ///
    /// Without `recursive` a directory is removed only when it is empty.
    pub fn rm(&self, recursive: bool) -> Result<()> {
        let metadata = fs::symlink_metadata(self).map_err(|source| match source.kind() {
            ErrorKind::NotFound => PathError::NotFound {
                path: self.to_path_buf(),
            },
            _ => PathError::Io {
                path: self.to_path_buf(),
                source,
            },
        })?;

        if !metadata.is_dir() {
            fs::remove_file(self).context(IoSnafu { path: self.as_path() })?;
        } else if recursive {
            fs::remove_dir_all(self).context(IoSnafu { path: self.as_path() })?;
        } else {
            fs::remove_dir(self).map_err(|source| match source.kind() {
                ErrorKind::DirectoryNotEmpty => PathError::DirectoryNotEmpty {
                    path: self.to_path_buf(),
                    source,
                },
                _ => PathError::Io {
                    path: self.to_path_buf(),
                    source,
                },
            })?;
        }

        debug!("Removed {}", self);
        Ok(())
    }
}

/// `dst` itself, or `dst/<name of src>` when `dst` is an existing directory.
fn target_inside(src: &StdPath, dst: &StdPath) -> PathBuf {
    match src.file_name() {
        Some(name) if dst.is_dir() => dst.join(name),
        _ => dst.to_path_buf(),
    }
}

fn copy_tree(src: &StdPath, dst: &StdPath) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).context(IoSnafu { path: parent })?;
    }
    fs::create_dir(dst).context(IoSnafu { path: dst })?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|error| PathError::from_walk(src, error))?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target).context(IoSnafu { path: &target })?;
        } else {
            fs::copy(entry.path(), &target).context(IoSnafu { path: entry.path() })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch() -> (TempDir, Path) {
        let tmp = TempDir::new().expect("Failed to create temp directory");
        let root = Path::new(tmp.path());
        (tmp, root)
    }

    #[test]
    fn test_cp_file() {
        let (_tmp, root) = scratch();
        let src = root.join("file.txt");
        let dst = root.join("copy.txt");
        fs::write(&src, b"content").unwrap();

        let copied = src.cp(&dst, false).expect("Failed to copy");
        assert!(copied.exists());
        assert_eq!(copied, dst);
        assert_eq!(fs::read(&dst).unwrap(), b"content");
        assert!(src.exists());
    }

    #[test]
    fn test_cp_file_into_directory() {
        let (_tmp, root) = scratch();
        let src = root.join("file.txt");
        let dir = root.join("target");
        fs::write(&src, b"").unwrap();
        fs::create_dir(&dir).unwrap();

        let copied = src.cp(&dir, false).unwrap();
        assert_eq!(copied, dir.join("file.txt"));
        assert!(copied.exists());
    }

    #[test]
    fn test_cp_directory_requires_recursive() {
        let (_tmp, root) = scratch();
        let src = root.join("dir");
        fs::create_dir(&src).unwrap();

        let result = src.cp(root.join("other"), false);
        assert!(matches!(result, Err(PathError::IsADirectory { .. })));
        assert!(!root.join("other").exists());
    }

    #[test]
    fn test_cp_directory_recursive() {
        let (_tmp, root) = scratch();
        let src = root.join("dir");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), b"a").unwrap();
        fs::write(src.join("nested").join("b.txt"), b"b").unwrap();

        let dst = root.join("copy");
        let copied = src.cp(&dst, true).unwrap();
        assert_eq!(copied, dst);
        assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"a");
        assert_eq!(fs::read(dst.join("nested").join("b.txt")).unwrap(), b"b");
    }

    #[test]
    fn test_cp_missing_source() {
        let (_tmp, root) = scratch();
        let result = root.join("missing.txt").cp(root.join("copy.txt"), false);
        assert!(matches!(result, Err(PathError::NotFound { .. })));
    }

    #[test]
    fn test_mv_file() {
        let (_tmp, root) = scratch();
        let src = root.join("file.txt");
        let dst = root.join("moved_file.txt");
        fs::write(&src, b"").unwrap();

        let moved = src.mv(&dst).unwrap();
        assert!(!src.exists());
        assert!(moved.exists());
        assert_eq!(moved, dst);
    }

    #[test]
    fn test_mv_into_directory() {
        let (_tmp, root) = scratch();
        let src = root.join("file.txt");
        let dir = root.join("dir");
        fs::write(&src, b"").unwrap();
        fs::create_dir(&dir).unwrap();

        let moved = src.mv(&dir).unwrap();
        assert_eq!(moved, dir.join("file.txt"));
        assert!(!src.exists());
    }

    #[test]
    fn test_rm_file() {
        let (_tmp, root) = scratch();
        let p = root.join("file.txt");
        fs::write(&p, b"").unwrap();
        assert!(p.exists());

        p.rm(false).unwrap();
        assert!(!p.exists());
    }

    #[test]
    fn test_rm_non_empty_directory_requires_recursive() {
        let (_tmp, root) = scratch();
        let dir = root.join("dir");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("file.txt"), b"").unwrap();

        assert!(matches!(
            dir.rm(false),
            Err(PathError::DirectoryNotEmpty { .. })
        ));
        assert!(dir.exists());

        dir.rm(true).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_rm_empty_directory() {
        let (_tmp, root) = scratch();
        let dir = root.join("empty");
        fs::create_dir(&dir).unwrap();

        dir.rm(false).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_rm_missing_path() {
        let (_tmp, root) = scratch();
        assert!(matches!(
            root.join("missing").rm(false),
            Err(PathError::NotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_cp_directory_copies_symlinked_contents() {
        use std::os::unix::fs::symlink;

        let (_tmp, root) = scratch();
        let shared = root.join("shared");
        fs::create_dir(&shared).unwrap();
        fs::write(shared.join("c.txt"), b"c").unwrap();
        let src = root.join("dir");
        fs::create_dir(&src).unwrap();
        symlink(&shared, src.join("linked")).unwrap();

        let dst = root.join("copy");
        src.cp(&dst, true).unwrap();
        assert!(!fs::symlink_metadata(dst.join("linked")).unwrap().is_symlink());
        assert_eq!(fs::read(dst.join("linked").join("c.txt")).unwrap(), b"c");
    }

    #[cfg(unix)]
    #[test]
    fn test_cp_unreadable_directory_is_an_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, root) = scratch();
        let src = root.join("dir");
        let locked = src.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = src.cp(root.join("copy"), true);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(result, Err(PathError::Io { .. })));
    }
}
