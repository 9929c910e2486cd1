use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{PathError, Result};
use crate::ext::SlashPathExt;
use crate::path::{dangling_link, ensure_directory};

/// Spaces added in front of the `|--` marker for every level of depth.
const INDENT_STEP: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Spaces in front of the root line.
    pub indent: usize,
    /// Levels rendered below the root, `None` for no limit.
    pub max_depth: Option<usize>,
}

/// A node of a directory snapshot. Children keep the raw entry names,
/// sorted, so names that are not valid UTF-8 stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesystemNode {
    File,
    Directory {
        children: Vec<(OsString, FilesystemNode)>,
    },
}

type OpenDirectory = (OsString, Vec<(OsString, FilesystemNode)>);

impl FilesystemNode {
    fn scan(root: &Path, max_depth: Option<usize>) -> Result<Self> {
        let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
        if let Some(max_depth) = max_depth {
            walker = walker.max_depth(max_depth);
        }

        // directories still being filled, the root at the bottom
        let mut open: Vec<OpenDirectory> = Vec::new();
        for entry in walker {
            let (name, depth, is_dir) = match entry {
                Ok(entry) => {
                    let is_dir = entry.file_type().is_dir();
                    if is_dir {
                        trace!("Scanning {}", entry.path().display());
                    }
                    (entry.file_name().to_os_string(), entry.depth(), is_dir)
                }
                Err(error) => match dangling_link(&error).as_deref().and_then(Path::file_name) {
                    Some(name) => (name.to_os_string(), error.depth(), false),
                    None => return Err(PathError::from_walk(root, error)),
                },
            };

            while open.len() > depth {
                close_directory(&mut open);
            }
            if is_dir {
                open.push((name, Vec::new()));
            } else if let Some((_, children)) = open.last_mut() {
                children.push((name, FilesystemNode::File));
            }
        }

        while open.len() > 1 {
            close_directory(&mut open);
        }
        let children = open.pop().map(|(_, children)| children).unwrap_or_default();
        Ok(FilesystemNode::Directory { children })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, FilesystemNode::Directory { .. })
    }

    fn collect_lines<'a>(&'a self, name: &'a OsStr, depth: usize, lines: &mut Vec<TreeLine<'a>>) {
        lines.push(TreeLine {
            depth,
            name: name.to_string_lossy(),
            is_dir: self.is_dir(),
        });
        if let FilesystemNode::Directory { children } = self {
            for (child_name, child) in children {
                child.collect_lines(child_name, depth + 1, lines);
            }
        }
    }
}

fn close_directory(open: &mut Vec<OpenDirectory>) {
    if let Some((name, children)) = open.pop() {
        if let Some((_, parent)) = open.last_mut() {
            parent.push((name, FilesystemNode::Directory { children }));
        }
    }
}

/// One rendered row of a [`DirectoryTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine<'a> {
    pub depth: usize,
    pub name: Cow<'a, str>,
    pub is_dir: bool,
}

impl TreeLine<'_> {
    pub fn marker(&self) -> &'static str {
        if self.is_dir { "[D]" } else { "[F]" }
    }
}

/// Snapshot of a directory, printed one entry per line:
///
/// ```text
/// |--[D] root
///       |--[F] file1.txt
///       |--[D] subdir
///             |--[F] file2.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTree {
    name: OsString,
    root: FilesystemNode,
    indent: usize,
}

impl DirectoryTree {
    /// Walks `root`, which must be an existing directory.
    pub fn scan(root: impl AsRef<Path>, options: &TreeOptions) -> Result<Self> {
        let root = root.as_ref();
        ensure_directory(root)?;
        debug!("Building directory tree of {}", root.display());

        let node = FilesystemNode::scan(root, options.max_depth)?;
        Ok(Self {
            name: root_name(root),
            root: node,
            indent: options.indent,
        })
    }

    pub fn root(&self) -> &FilesystemNode {
        &self.root
    }

    /// Rows in depth-first order, the root first.
    pub fn lines(&self) -> Vec<TreeLine<'_>> {
        let mut lines = Vec::new();
        self.root.collect_lines(&self.name, 0, &mut lines);
        lines
    }

    /// Number of spaces in front of a row at `depth`.
    pub fn indent_of(&self, depth: usize) -> usize {
        self.indent + depth * INDENT_STEP
    }
}

impl fmt::Display for DirectoryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(
                f,
                "{:width$}|--{} {}",
                "",
                line.marker(),
                line.name,
                width = self.indent_of(line.depth)
            )?;
        }
        Ok(())
    }
}

/// Renders the whole tree below `root` with default options.
///
/// Fails with `NotFound` if `root` does not exist and with `NotADirectory`
/// if it is not a directory.
pub fn get_directory_tree(root: impl AsRef<Path>) -> Result<String> {
    get_directory_tree_with(root, &TreeOptions::default())
}

pub fn get_directory_tree_with(root: impl AsRef<Path>, options: &TreeOptions) -> Result<String> {
    Ok(DirectoryTree::scan(root, options)?.to_string())
}

// `.` and `/` have no file name of their own
fn root_name(root: &Path) -> OsString {
    root.file_name()
        .map(OsStr::to_os_string)
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|canonical| canonical.file_name().map(OsStr::to_os_string))
        })
        .unwrap_or_else(|| root.to_slash_string().into())
}
