//! Collections returned by the listing operations.

mod counted_list;

pub use counted_list::CountedList;
