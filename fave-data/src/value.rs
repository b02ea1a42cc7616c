use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::DataError;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Text,
    Timestamp,
}

/// A bindable value, as stored in a [`Row`] or passed to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub fn sql_type(&self) -> SqlType {
        match self {
            SqlValue::Integer(_) => SqlType::Integer,
            SqlValue::Text(_) => SqlType::Text,
            SqlValue::Timestamp(_) => SqlType::Timestamp,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

/// Column descriptor: name plus storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: SqlType,
}

impl Column {
    pub const fn new(name: &'static str, ty: SqlType) -> Self {
        Self { name, ty }
    }
}

/// A decoded row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<&'static str, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &'static str, value: impl Into<SqlValue>) {
        self.values.insert(column, value.into());
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.get(column)
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, DataError> {
        match self.require(column)? {
            SqlValue::Integer(i) => Ok(*i),
            other => Err(mismatch(column, SqlType::Integer, other)),
        }
    }

    pub fn get_text(&self, column: &str) -> Result<&str, DataError> {
        match self.require(column)? {
            SqlValue::Text(s) => Ok(s),
            other => Err(mismatch(column, SqlType::Text, other)),
        }
    }

    pub fn get_timestamp(&self, column: &str) -> Result<DateTime<Utc>, DataError> {
        match self.require(column)? {
            SqlValue::Timestamp(t) => Ok(*t),
            other => Err(mismatch(column, SqlType::Timestamp, other)),
        }
    }

    /// Values for `columns`, in that order.
    pub fn project(&self, columns: &[&str]) -> Result<Vec<SqlValue>, DataError> {
        columns
            .iter()
            .map(|column| self.require(column).cloned())
            .collect()
    }

    fn require(&self, column: &str) -> Result<&SqlValue, DataError> {
        self.values
            .get(column)
            .ok_or_else(|| DataError::Decode(format!("missing column `{column}`")))
    }
}

fn mismatch(column: &str, expected: SqlType, found: &SqlValue) -> DataError {
    DataError::Decode(format!(
        "column `{column}`: expected {expected:?}, found {:?}",
        found.sql_type()
    ))
}
