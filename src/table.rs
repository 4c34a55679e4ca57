use std::fmt;
use itertools::Itertools;
use crate::id::StandardId;
use crate::pool::FilterEntry;

/// One row of a standard-id acceptance filter table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// 0-based controller index (bus address - 1)
    pub controller: u8,
    pub id: StandardId,
    pub enabled: bool,
}

/// FilterTable
///
/// Snapshot of a bus's assigned filters in the form handed to a
/// `BusModeController`. Built fresh for every apply and never kept around.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterTable {
    entries: Vec<TableEntry>,
}

impl FilterTable {
    #[inline]
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers of all enabled entries, in table order.
    pub fn enabled_ids(&self) -> impl Iterator<Item = StandardId> + '_ {
        self.entries.iter().filter(|e| e.enabled).map(|e| e.id)
    }
}

impl fmt::Display for FilterTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ids = self.entries.iter().map(|e| format!("{:#05x}", e.id));
        write!(f, "[{}] ({} entries)", ids.format(", "), self.entries.len())
    }
}

/// Build the filter table for controller `controller` from a pool snapshot.
///
/// Entries come out sorted by controller and identifier, the order lookup
/// table hardware searches in. The result depends only on the set of
/// entries, not on which slots they landed in.
pub fn build_filter_table<I>(controller: u8, snapshot: I) -> FilterTable
    where I: IntoIterator<Item = FilterEntry>
{
    let entries = snapshot
        .into_iter()
        .map(|entry| TableEntry {
            controller,
            id: entry.id,
            enabled: entry.enabled,
        })
        .sorted_by_key(|e| (e.controller, e.id))
        .collect();

    FilterTable { entries }
}
