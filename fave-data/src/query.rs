use crate::entity::Entity;
use crate::value::{Row, SqlValue};

/// A predicate over one table: equality conditions joined by `AND`.
///
/// Rendered to SQL with `?` placeholders by the `build_*` methods, or
/// evaluated directly against a [`Row`] with [`matches`](Self::matches).
/// Identifiers are validated, never quoted.
///
/// # Example
///
/// ```ignore
/// let (sql, params) = QueryBuilder::new("post_favorite")
///     .where_eq("post_id", 42)
///     .where_eq("user_id", 7)
///     .limit(2)
///     .build_select(&["post_id", "user_id", "time"])?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    table: String,
    conditions: Vec<(String, SqlValue)>,
    limit_val: Option<u64>,
}

impl QueryBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            conditions: Vec::new(),
            limit_val: None,
        }
    }

    /// Start a query on `E`'s table.
    pub fn for_entity<E: Entity>() -> Self {
        Self::new(E::table_name())
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions.push((column.to_string(), value.into()));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit_val = Some(limit);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit_val
    }

    /// True if every condition holds for `row`. Missing columns never match.
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }

    /// Build a SELECT query returning `(sql, bind_values)`.
    pub fn build_select(&self, columns: &[&str]) -> Result<(String, Vec<SqlValue>), QueryError> {
        let columns = columns
            .iter()
            .map(|c| self.identifier(c))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");
        let mut sql = format!("SELECT {columns} FROM {}", self.identifier(&self.table)?);
        let params = self.append_where(&mut sql)?;
        if let Some(limit) = self.limit_val {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        Ok((sql, params))
    }

    /// Build a COUNT query returning `(sql, bind_values)`.
    pub fn build_count(&self) -> Result<(String, Vec<SqlValue>), QueryError> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.identifier(&self.table)?);
        let params = self.append_where(&mut sql)?;
        Ok((sql, params))
    }

    /// Build a DELETE query. Refuses to build one without conditions.
    pub fn build_delete(&self) -> Result<(String, Vec<SqlValue>), QueryError> {
        if self.conditions.is_empty() {
            return Err(QueryError::UnboundedDelete(self.table.clone()));
        }
        let mut sql = format!("DELETE FROM {}", self.identifier(&self.table)?);
        let params = self.append_where(&mut sql)?;
        Ok((sql, params))
    }

    /// Build an INSERT of one row into this builder's table; conditions are ignored.
    pub fn build_insert(
        &self,
        values: &[(&str, SqlValue)],
    ) -> Result<(String, Vec<SqlValue>), QueryError> {
        let mut columns = Vec::with_capacity(values.len());
        for (column, _) in values {
            columns.push(self.identifier(column)?);
        }
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.identifier(&self.table)?,
            columns.join(", "),
            vec!["?"; values.len()].join(", ")
        );
        Ok((sql, values.iter().map(|(_, v)| v.clone()).collect()))
    }

    fn append_where(&self, sql: &mut String) -> Result<Vec<SqlValue>, QueryError> {
        if self.conditions.is_empty() {
            return Ok(Vec::new());
        }
        let mut clauses = Vec::with_capacity(self.conditions.len());
        for (column, _) in &self.conditions {
            clauses.push(format!("{} = ?", self.identifier(column)?));
        }
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
        Ok(self.conditions.iter().map(|(_, v)| v.clone()).collect())
    }

    fn identifier<'a>(&self, ident: &'a str) -> Result<&'a str, QueryError> {
        if is_valid_identifier(ident) {
            Ok(ident)
        } else {
            Err(QueryError::InvalidIdentifier(ident.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidIdentifier(String),
    UnboundedDelete(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier(ident) => write!(f, "Invalid identifier: {ident}"),
            QueryError::UnboundedDelete(table) => {
                write!(f, "Refusing DELETE on `{table}` without conditions")
            }
        }
    }
}

impl std::error::Error for QueryError {}

fn is_valid_identifier(ident: &str) -> bool {
    !ident.is_empty() && ident.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
