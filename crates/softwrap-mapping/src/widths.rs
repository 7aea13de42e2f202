//! Per-line maximum visual width cache.

use std::collections::HashMap;
use std::collections::hash_map;

/// Mapping from logical line number to the maximum visual width (in cells)
/// observed for that line during the current recalculation batch.
///
/// The map is cleared at the start of every batch; within a batch, updates go
/// through [`update_max`](LineWidths::update_max) (or a direct
/// [`insert`](LineWidths::insert) for a line's first write), so for any line
/// present the stored value is the maximum of all widths reported for it since
/// the last clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineWidths {
    widths: HashMap<usize, usize>,
}

impl LineWidths {
    /// Create an empty width map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all recorded widths.
    pub fn clear(&mut self) {
        self.widths.clear();
    }

    /// Get the recorded width for `line`, if any.
    pub fn get(&self, line: usize) -> Option<usize> {
        self.widths.get(&line).copied()
    }

    /// Whether `line` has a recorded width.
    pub fn contains_line(&self, line: usize) -> bool {
        self.widths.contains_key(&line)
    }

    /// Record `width` for `line`, overwriting any previous value.
    pub fn insert(&mut self, line: usize, width: usize) {
        self.widths.insert(line, width);
    }

    /// Record `width` for `line` only if it exceeds the currently stored value
    /// (0 if absent).
    pub fn update_max(&mut self, line: usize, width: usize) {
        let stored = self.widths.entry(line).or_insert(0);
        if width > *stored {
            *stored = width;
        }
    }

    /// Number of lines with a recorded width.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Whether no line has a recorded width.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Iterate over `(line, width)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.widths.iter().map(|(&line, &width)| (line, width))
    }

    /// Collect `(line, width)` pairs sorted by line number.
    pub fn to_sorted_vec(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self.iter().collect();
        pairs.sort_unstable_by_key(|&(line, _)| line);
        pairs
    }
}

impl<'a> IntoIterator for &'a LineWidths {
    type Item = (usize, usize);
    type IntoIter = WidthsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        WidthsIter {
            inner: self.widths.iter(),
        }
    }
}

/// Iterator over `(line, width)` pairs of a [`LineWidths`].
pub struct WidthsIter<'a> {
    inner: hash_map::Iter<'a, usize, usize>,
}

impl Iterator for WidthsIter<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&line, &width)| (line, width))
    }
}
