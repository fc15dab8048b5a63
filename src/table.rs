//! Tabular view over a sequence of items
//!
//! A [`TableSchema`] lists the columns to expose, each with a name, a type
//! and an accessor that pulls the value out of an item. A [`TableReader`]
//! then walks any iterator of items one row at a time, forward only, and
//! answers field questions about the current row.
//!
//! ```
//! use keyed_sync::table::{FieldType, FieldValue, TableSchema};
//!
//! struct Trade { symbol: &'static str, qty: i64 }
//!
//! let schema = TableSchema::new()
//!     .field("symbol", FieldType::Text, |t: &Trade| FieldValue::from(t.symbol))
//!     .field("qty", FieldType::Integer, |t: &Trade| FieldValue::Integer(t.qty));
//!
//! let trades = vec![Trade { symbol: "ACME", qty: 10 }];
//! let mut reader = schema.reader(trades.iter());
//!
//! assert_eq!(reader.field_count(), 2);
//! assert!(reader.read());
//! assert_eq!(reader.field_value(1).unwrap(), FieldValue::Integer(10));
//! assert!(!reader.read());
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Integer,
    Float,
    Boolean,
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

type Accessor<T> = Box<dyn Fn(&T) -> FieldValue>;

/// Column definition.
pub struct FieldDescriptor<T> {
    name: String,
    field_type: FieldType,
    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn value(&self, row: &T) -> FieldValue {
        (self.accessor)(row)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .finish()
    }
}

/// Ordered list of columns for rows of type `T`.
#[derive(Debug)]
pub struct TableSchema<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> TableSchema<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a column.
    pub fn field<F>(mut self, name: &str, field_type: FieldType, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + 'static,
    {
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            field_type,
            accessor: Box::new(accessor),
        });
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Start reading `rows` against this schema.
    pub fn reader<I>(&self, rows: I) -> TableReader<'_, T, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        TableReader {
            schema: self,
            rows: Some(rows.into_iter()),
            current: None,
        }
    }
}

impl<T> Default for TableSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward-only cursor over rows, answering field questions per row.
pub struct TableReader<'s, T, I>
where
    I: Iterator,
{
    schema: &'s TableSchema<T>,
    rows: Option<I>,
    current: Option<I::Item>,
}

impl<'s, T, I> TableReader<'s, T, I>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    pub fn field_count(&self) -> usize {
        self.schema.fields.len()
    }

    pub fn field_name(&self, i: usize) -> Result<&'s str> {
        Ok(self.descriptor(i)?.name())
    }

    pub fn field_type(&self, i: usize) -> Result<FieldType> {
        Ok(self.descriptor(i)?.field_type())
    }

    /// Column position for `name`, if the schema has it.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.schema.fields.iter().position(|f| f.name == name)
    }

    /// Value of column `i` in the current row.
    ///
    /// # Errors
    ///
    /// `Error::FieldIndex` for an unknown column, `Error::NoCurrentRow` when
    /// `read()` has not returned `true` for a row yet.
    pub fn field_value(&self, i: usize) -> Result<FieldValue> {
        let descriptor = self.descriptor(i)?;
        let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
        Ok(descriptor.value(row.borrow()))
    }

    /// Every value of the current row, in column order.
    pub fn values(&self) -> Result<Vec<FieldValue>> {
        let row = self.current.as_ref().ok_or(Error::NoCurrentRow)?;
        Ok(self
            .schema
            .fields
            .iter()
            .map(|f| f.value(row.borrow()))
            .collect())
    }

    /// Advance to the next row. Returns `false` once the rows run out.
    pub fn read(&mut self) -> bool {
        let next = self.rows.as_mut().and_then(Iterator::next);
        if next.is_none() {
            self.close();
            return false;
        }
        self.current = next;
        true
    }

    /// Release the underlying rows. Further `read()` calls return `false`.
    pub fn close(&mut self) {
        self.rows = None;
        self.current = None;
    }

    pub fn is_closed(&self) -> bool {
        self.rows.is_none()
    }

    fn descriptor(&self, i: usize) -> Result<&'s FieldDescriptor<T>> {
        self.schema.fields.get(i).ok_or(Error::FieldIndex {
            index: i,
            count: self.schema.fields.len(),
        })
    }
}
