use std::path::PathBuf;

use snafu::Snafu;

use crate::ext::SlashPathExt;

pub type Result<T, E = PathError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PathError {
    #[snafu(display("No such file or directory: {}", path.slash_display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Not a directory: {}", path.slash_display()))]
    NotADirectory { path: PathBuf },
    #[snafu(display(
        "Is a directory: {}. Use recursive copy for directories",
        path.slash_display()
    ))]
    IsADirectory { path: PathBuf },
    #[snafu(display(
        "Directory `{}` is not empty. Use recursive removal for non-empty directories",
        path.slash_display()
    ))]
    DirectoryNotEmpty {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("I/O error at {}", path.slash_display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PathError {
    /// The path the failing operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PathError::NotFound { path }
            | PathError::NotADirectory { path }
            | PathError::IsADirectory { path }
            | PathError::DirectoryNotEmpty { path, .. }
            | PathError::Io { path, .. } => path,
        }
    }

    /// Wraps a failure met while walking below `root`, keeping the path of
    /// the entry that failed when the walker knows it.
    pub(crate) fn from_walk(root: &std::path::Path, error: walkdir::Error) -> Self {
        let path = error.path().unwrap_or(root).to_path_buf();
        PathError::Io {
            path,
            source: error.into(),
        }
    }

    /// The underlying platform error, if the failure came from one.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            PathError::DirectoryNotEmpty { source, .. } | PathError::Io { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_mentions_path() {
        let not_found = PathError::NotFound {
            path: PathBuf::from("/this/path/does/not/exist"),
        };
        let not_dir = PathError::NotADirectory {
            path: PathBuf::from("/this/path/does/not/exist.txt"),
        };

        assert!(format!("{}", not_found).contains("No such file or directory"));
        assert!(format!("{}", not_found).contains("/this/path/does/not/exist"));
        assert!(format!("{}", not_dir).contains("Not a directory"));
        assert!(format!("{}", not_dir).contains("exist.txt"));
    }

    #[test]
    fn test_io_error_is_passed_through() {
        let error = PathError::Io {
            path: PathBuf::from("/root/secret"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(error.path(), std::path::Path::new("/root/secret"));
        assert_eq!(
            error.io_error().map(|e| e.kind()),
            Some(std::io::ErrorKind::PermissionDenied)
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error_absent_for_logical_errors() {
        let error = PathError::IsADirectory {
            path: PathBuf::from("/tmp"),
        };
        assert!(error.io_error().is_none());
    }
}
