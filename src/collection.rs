//! Immutable, order-preserving sequence of records.

use std::{ops::Index, slice, sync::Arc};

use clap::ValueEnum;

use crate::record::Record;

/// Order in which source rows end up in a [`RecordList`].
///
/// `Reversed` treats every parsed row as prepended, so the last line of the
/// file becomes the head of the list. "First matching" results in the
/// derived queries follow whichever order the list was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum LoadOrder {
    #[default]
    Reversed,
    File,
}

/// Shared, read-only list of records.
///
/// Cloning is cheap and never copies rows. Nothing hands out mutable access,
/// so every traversal sees the list exactly as it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList {
    rows: Arc<[Record]>,
}

impl RecordList {
    /// Wraps rows that are already in the desired order.
    pub fn new(rows: Vec<Record>) -> Self {
        RecordList { rows: rows.into() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Builds a list from rows in the order they were read from the source.
    pub fn from_source_rows(mut rows: Vec<Record>, order: LoadOrder) -> Self {
        if order == LoadOrder::Reversed {
            rows.reverse();
        }
        Self::new(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.rows.first()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.rows.iter()
    }

    pub fn to_vec(&self) -> Vec<Record> {
        self.rows.to_vec()
    }
}

impl Default for RecordList {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<usize> for RecordList {
    type Output = Record;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Record> for RecordList {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        RecordList {
            rows: iter.into_iter().collect(),
        }
    }
}
