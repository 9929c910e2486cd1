use std::fmt;
use std::ops::{Bound, RangeBounds};

use derive_more::{Deref, DerefMut, IntoIterator};
use rand::seq::SliceRandom;

const DEFAULT_MAX_LINES: usize = 15;
const DEFAULT_MAX_WIDTH: usize = 120;

/// A list that prints its length together with a truncated view of its items.
///
/// ```text
/// (#5) [1, 2, 3, 4, 5]
/// ```
///
/// When the one-line form would exceed `max_width`, items are printed one per
/// line, aligned under the first one, and at most `max_lines` lines are shown
/// (the last item is always kept).
#[derive(Clone, Deref, DerefMut, IntoIterator)]
pub struct CountedList<T> {
    #[deref]
    #[deref_mut]
    #[into_iterator(owned, ref, ref_mut)]
    items: Vec<T>,
    max_lines: usize,
    max_width: usize,
}

impl<T> CountedList<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn with_limits(items: Vec<T>, max_lines: usize, max_width: usize) -> Self {
        Self {
            items,
            max_lines,
            max_width,
        }
    }

    /// Number of items, same as `len()`.
    pub fn n(&self) -> usize {
        self.items.len()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> CountedList<T> {
    /// Copies the items in `range` into a new list, `None` when out of bounds.
    pub fn sliced(&self, range: impl RangeBounds<usize>) -> Option<Self> {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        self.items.get(bounds).map(|items| self.derive(items.to_vec()))
    }

    /// Collects the items at `indices`, in that order. `None` if any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Option<Self> {
        indices
            .iter()
            .map(|&index| self.items.get(index).cloned())
            .collect::<Option<Vec<_>>>()
            .map(|items| self.derive(items))
    }

    /// Draws `min(k, n)` distinct items at random.
    pub fn sample(&self, k: usize) -> Self {
        let mut rng = rand::thread_rng();
        let items = self.items.choose_multiple(&mut rng, k).cloned().collect();
        self.derive(items)
    }

    fn derive(&self, items: Vec<T>) -> Self {
        Self::with_limits(items, self.max_lines, self.max_width)
    }
}

impl<T> Default for CountedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for CountedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::with_limits(items, DEFAULT_MAX_LINES, DEFAULT_MAX_WIDTH)
    }
}

impl<T> FromIterator<T> for CountedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for CountedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: PartialEq> PartialEq for CountedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for CountedList<T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for CountedList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: PartialEq> PartialEq<[T]> for CountedList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items.as_slice() == other
    }
}

impl<T: fmt::Debug> fmt::Display for CountedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.items.len();
        let Some((first, rest)) = self.items.split_first() else {
            return f.write_str("(#0) []");
        };

        // width of the `(#N) [` prefix
        let indent_length = 5 + count.to_string().len();

        let mut one_line = format!("{first:?}");
        for item in rest {
            one_line.push_str(&format!(", {item:?}"));
            if one_line.chars().count() + indent_length + 1 > self.max_width {
                break;
            }
        }
        if one_line.chars().count() + indent_length + 1 <= self.max_width {
            return write!(f, "(#{count}) [{one_line}]");
        }

        let indent = " ".repeat(indent_length);
        let separator = format!(",\n{indent}");
        let body = if count <= self.max_lines {
            join_debug(&self.items, &separator)
        } else {
            let head = join_debug(&self.items[..self.max_lines.saturating_sub(1)], &separator);
            let tail = format!("...\n{indent}{:?}", self.items[count - 1]);
            if head.is_empty() {
                tail
            } else {
                format!("{head}{separator}{tail}")
            }
        };
        write!(f, "(#{count}) [{body}]")
    }
}

fn join_debug<T: fmt::Debug>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(|item| format!("{item:?}"))
        .collect::<Vec<_>>()
        .join(separator)
}

impl<T: fmt::Debug> fmt::Debug for CountedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
