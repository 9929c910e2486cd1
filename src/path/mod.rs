//! The `Path` value type and the operations it offers on top of `std::path`.

mod file_ops;
mod listing;
#[allow(clippy::module_inception)]
mod path;

pub(crate) use listing::dangling_link;
pub use listing::ListOptions;
pub use path::Path;
pub(crate) use path::ensure_directory;
