//! Directory tree snapshots and their indented text rendering.
//!
//! A tree is read once from disk into [`FilesystemNode`]s and can then be
//! printed as a whole or walked row by row.

mod tree;

pub use tree::{
    DirectoryTree, FilesystemNode, TreeLine, TreeOptions, get_directory_tree,
    get_directory_tree_with,
};
