//! List/table view state.
//!
//! DESIGN
//! ======
//! The collection is `None` until the first fetch of the current mount
//! completes; that is how "loading" is told apart from "loaded, zero rows".
//! Every mount (and every reload) hands out a [`LoadTicket`] stamped with a
//! generation counter. A result presented with a stale ticket belongs to a
//! view that no longer exists and is dropped.
//!
//! Created records are appended, never refetched. A record created before
//! the first fetch lands is queued and merged into the fetched collection.

use crate::columns::{ColumnDescriptor, SortOrder, UnknownColumn, VisibleColumns, sorted_rows};
use crate::export::{CsvExport, ExportError};
use crate::record::Record;

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;

/// Proof that a fetch was started for a particular mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a fetch result can only be applied with its ticket"]
pub struct LoadTicket {
    generation: u64,
}

/// What [`ListView::append`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// Pushed onto the end of the loaded collection.
    Pushed,
    /// A record with the same id was already present and was replaced.
    Replaced,
    /// The collection is not loaded yet; merged once the fetch lands.
    Queued,
    /// The view is unmounted; the record was dropped.
    Dropped,
}

/// Active sort: column key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: &'static str,
    pub order: SortOrder,
}

/// Visible columns and display-ordered cell text, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProjection {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ListView {
    collection: Option<Vec<Record>>,
    queued: Vec<Record>,
    columns: VisibleColumns,
    sort: Option<SortSpec>,
    generation: u64,
    mounted: bool,
}

impl ListView {
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            collection: None,
            queued: Vec::new(),
            columns: VisibleColumns::new(columns),
            sort: None,
            generation: 0,
            mounted: false,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Mount the view. Returns the ticket for the one initial fetch, or
    /// `None` if the view is already mounted.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.columns.reset();
        self.sort = None;
        Some(self.next_ticket())
    }

    /// Discard the collection. In-flight fetches become stale.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.collection = None;
        self.queued.clear();
        self.generation += 1;
    }

    /// Start a refetch for the current mount. The current collection stays
    /// on screen until the new one replaces it. Earlier tickets go stale.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        if !self.mounted {
            return None;
        }
        Some(self.next_ticket())
    }

    /// Install a fetched collection. Returns `false` when the ticket is
    /// stale and the result was discarded.
    pub fn complete_load(&mut self, ticket: LoadTicket, mut records: Vec<Record>) -> bool {
        if !self.mounted || ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }
        for record in self.queued.drain(..) {
            if !records.iter().any(|r| r.id() == record.id()) {
                records.push(record);
            }
        }
        self.collection = Some(records);
        true
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.collection.is_some()
    }

    /// The collection in fetch/append order, `None` while unloaded.
    #[must_use]
    pub fn records(&self) -> Option<&[Record]> {
        self.collection.as_deref()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Merge a freshly created record. Ids stay unique: a record whose id is
    /// already present replaces the old one at the same position.
    pub fn append(&mut self, record: Record) -> Appended {
        if !self.mounted {
            return Appended::Dropped;
        }
        let Some(collection) = self.collection.as_mut() else {
            self.queued.retain(|r| r.id() != record.id());
            self.queued.push(record);
            return Appended::Queued;
        };
        match collection.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                collection[index] = record;
                Appended::Replaced
            }
            None => {
                collection.push(record);
                Appended::Pushed
            }
        }
    }

    // -------------------------------------------------------------------------
    // Presentation
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn columns(&self) -> &VisibleColumns {
        &self.columns
    }

    /// Show or hide a column; see [`VisibleColumns::toggle`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn toggle_column(&mut self, key: &str) -> Result<bool, UnknownColumn> {
        self.columns.toggle(key)
    }

    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> Result<(), UnknownColumn> {
        self.columns.set_visible(key, visible)
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Sort by a column.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn sort_by(&mut self, key: &str, order: SortOrder) -> Result<(), UnknownColumn> {
        let column = self.columns.get(key).ok_or_else(|| UnknownColumn(key.to_owned()))?;
        self.sort = Some(SortSpec { key: column.key, order });
        Ok(())
    }

    /// Header-click behavior: a new column sorts ascending, the active
    /// column flips direction.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn toggle_sort(&mut self, key: &str) -> Result<SortOrder, UnknownColumn> {
        let order = match self.sort {
            Some(active) if active.key == key => active.order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.sort_by(key, order)?;
        Ok(order)
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Records in display order. Empty while unloaded.
    #[must_use]
    pub fn rows(&self) -> Vec<&Record> {
        let records = self.collection.as_deref().unwrap_or(&[]);
        match self.sort.and_then(|s| self.columns.get(s.key).map(|c| (c, s.order))) {
            Some((column, order)) => sorted_rows(records, column, order),
            None => records.iter().collect(),
        }
    }

    /// Cell text for the visible columns, `None` while unloaded.
    #[must_use]
    pub fn table(&self) -> Option<TableProjection> {
        self.collection.as_ref()?;
        let visible: Vec<&ColumnDescriptor> = self.columns.visible().collect();
        let headers = visible.iter().map(|c| c.title).collect();
        let rows = self
            .rows()
            .into_iter()
            .map(|record| visible.iter().map(|c| c.cell(record)).collect())
            .collect();
        Some(TableProjection { headers, rows })
    }

    /// Export the whole loaded collection, independent of visible columns
    /// and sort.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotLoaded`] while unloaded, or the CSV
    /// writer's error.
    pub fn export(&self, filename: &str) -> Result<CsvExport, ExportError> {
        let records = self.collection.as_deref().ok_or(ExportError::NotLoaded)?;
        CsvExport::new(filename, records)
    }

    fn next_ticket(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket { generation: self.generation }
    }
}
