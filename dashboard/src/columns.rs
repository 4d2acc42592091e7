//! Column descriptors, column visibility and sorting.
//!
//! DESIGN
//! ======
//! A [`ColumnDescriptor`] describes how one record field projects into a
//! table cell: which field it reads, how it compares for sorting and how
//! its value is rendered. Descriptors never touch the records themselves.
//! Sorting produces a permutation of borrowed rows and visibility only
//! changes which descriptors are projected.

use std::cmp::Ordering;

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::record::{Record, display_value};

#[cfg(test)]
#[path = "columns_test.rs"]
mod tests;

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// How a column compares two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Numeric difference. Numbers and numeric strings both qualify.
    Numeric,
    /// Case-insensitive lexical order, ties broken case-sensitively.
    Text,
    /// Chronological order of RFC 3339 timestamps or plain dates.
    Chronological,
}

/// How a column turns a field value into cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// The value as-is.
    Plain,
    /// A timestamp reduced to `YYYY-MM-DD`. Unparseable values pass through.
    Date,
    /// A route built from `template`, replacing `{id}` with the field value.
    Link { template: &'static str },
}

/// Metadata describing one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub field: &'static str,
    pub sort: Option<SortKind>,
    pub render: Render,
}

impl ColumnDescriptor {
    /// A plain, unsortable column reading the field named like its key.
    #[must_use]
    pub const fn new(key: &'static str, title: &'static str) -> Self {
        Self { key, title, field: key, sort: None, render: Render::Plain }
    }

    #[must_use]
    pub const fn field(mut self, field: &'static str) -> Self {
        self.field = field;
        self
    }

    #[must_use]
    pub const fn sort(mut self, kind: SortKind) -> Self {
        self.sort = Some(kind);
        self
    }

    #[must_use]
    pub const fn render(mut self, render: Render) -> Self {
        self.render = render;
        self
    }

    /// Cell text for `record` in this column.
    #[must_use]
    pub fn cell(&self, record: &Record) -> String {
        let value = record.get(self.field);
        match self.render {
            Render::Plain => display_value(value),
            Render::Date => render_date(value),
            Render::Link { template } => template.replace("{id}", &display_value(value)),
        }
    }

    /// Compare two records on this column. Unsortable columns compare equal.
    ///
    /// Missing or unparseable values sort after every present value.
    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let (a, b) = (a.get(self.field), b.get(self.field));
        match self.sort {
            None => Ordering::Equal,
            Some(SortKind::Numeric) => compare_present(as_number(a), as_number(b), Number::compare),
            Some(SortKind::Text) => compare_present(as_text(a), as_text(b), |x, y| {
                x.to_lowercase().cmp(&y.to_lowercase()).then_with(|| x.cmp(y))
            }),
            Some(SortKind::Chronological) => {
                compare_present(as_timestamp(a), as_timestamp(b), OffsetDateTime::cmp)
            }
        }
    }
}

fn compare_present<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A sortable number. Integers stay exact so ids beyond 2^53 still order
/// correctly; anything else is a finite float.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn compare(a: &Self, b: &Self) -> Ordering {
        match (a, b) {
            (Self::Int(x), Self::Int(y)) => x.cmp(y),
            _ => a.as_f64().total_cmp(&b.as_f64()),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(f) => f,
        }
    }
}

/// Numbers and numeric strings. `NaN` and infinities count as unparseable.
fn as_number(value: Option<&Value>) -> Option<Number> {
    let number = match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Number::Int(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Number::Int(i128::from(u))
            } else {
                Number::Float(n.as_f64()?)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i128>() {
                Number::Int(i)
            } else if let Ok(f) = s.parse::<f64>() {
                Number::Float(f)
            } else {
                return None;
            }
        }
        _ => return None,
    };
    match number {
        Number::Float(f) if !f.is_finite() => None,
        finite => Some(finite),
    }
}

fn as_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        other => Some(display_value(Some(other))),
    }
}

fn as_timestamp(value: Option<&Value>) -> Option<OffsetDateTime> {
    match value? {
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Parse the timestamp shapes the backend emits: RFC 3339, a naive
/// `YYYY-MM-DD[ T]HH:MM:SS` (read as UTC) or a bare `YYYY-MM-DD`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let naive_space = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let naive_t = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    for fmt in [naive_space, naive_t] {
        if let Ok(ts) = PrimitiveDateTime::parse(raw, fmt) {
            return Some(ts.assume_utc());
        }
    }
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }
    None
}

fn render_date(value: Option<&Value>) -> String {
    let raw = display_value(value);
    let Some(ts) = parse_timestamp(&raw) else {
        return raw;
    };
    ts.date()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or(raw)
}

// =============================================================================
// SORTING
// =============================================================================

/// Sort direction. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Rows of `records` in display order for `column`. The slice is untouched;
/// ties keep their collection order in both directions.
#[must_use]
pub fn sorted_rows<'a>(records: &'a [Record], column: &ColumnDescriptor, order: SortOrder) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = records.iter().collect();
    rows.sort_by(|a, b| match order {
        SortOrder::Ascending => column.compare(a, b),
        SortOrder::Descending => column.compare(b, a),
    });
    rows
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Error for operations naming a column that is not declared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column `{0}`")]
pub struct UnknownColumn(pub String);

/// The declared columns plus the subset currently shown.
///
/// Visible columns are kept as ascending indices into the declared list, so
/// re-showing a column always puts it back at its declared position no
/// matter which other columns were hidden in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleColumns {
    columns: Vec<ColumnDescriptor>,
    visible: Vec<usize>,
}

impl VisibleColumns {
    /// Every declared column starts visible.
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        let visible = (0..columns.len()).collect();
        Self { columns, visible }
    }

    /// Hide the column if shown, show it if hidden. Returns whether the
    /// column is visible afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn toggle(&mut self, key: &str) -> Result<bool, UnknownColumn> {
        let index = self.index_of(key)?;
        match self.visible.binary_search(&index) {
            Ok(pos) => {
                self.visible.remove(pos);
                Ok(false)
            }
            Err(pos) => {
                self.visible.insert(pos, index);
                Ok(true)
            }
        }
    }

    /// Show or hide a column explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> Result<(), UnknownColumn> {
        if self.is_visible(key)? != visible {
            self.toggle(key)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`UnknownColumn`] if no declared column has `key`.
    pub fn is_visible(&self, key: &str) -> Result<bool, UnknownColumn> {
        let index = self.index_of(key)?;
        Ok(self.visible.binary_search(&index).is_ok())
    }

    pub fn visible(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.visible.iter().map(|&i| &self.columns[i])
    }

    #[must_use]
    pub fn visible_keys(&self) -> Vec<&'static str> {
        self.visible().map(|c| c.key).collect()
    }

    #[must_use]
    pub fn all(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Declared column by key, visible or not.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Show every declared column again.
    pub fn reset(&mut self) {
        self.visible = (0..self.columns.len()).collect();
    }

    fn index_of(&self, key: &str) -> Result<usize, UnknownColumn> {
        self.columns
            .iter()
            .position(|c| c.key == key)
            .ok_or_else(|| UnknownColumn(key.to_owned()))
    }
}
