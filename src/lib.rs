//! Path helpers for listing and inspecting directories.
//!
//! [`Path`] wraps [`std::path::PathBuf`] and adds directory listing
//! ([`Path::ls`], [`Path::rls`], [`Path::list`]), whole-segment queries
//! ([`Path::contains`], [`Path::has_any`], [`Path::has_all`]), segment
//! substitution ([`Path::change`]) and simple file operations.
//! [`get_directory_tree`] renders a directory as indented text.
//!
//! ```no_run
//! use pathlist::{Path, get_directory_tree};
//!
//! let sources = Path::from("src").rls(Some(".rs"))?;
//! println!("{sources}");
//! print!("{}", get_directory_tree("src")?);
//! # Ok::<(), pathlist::PathError>(())
//! ```

mod collections;
mod error;
mod ext;
mod filesystem;
mod path;

pub use collections::CountedList;
pub use error::{PathError, Result};
pub use ext::SlashPathExt;
pub use filesystem::{
    DirectoryTree, FilesystemNode, TreeLine, TreeOptions, get_directory_tree,
    get_directory_tree_with,
};
pub use path::{ListOptions, Path};
