use crate::error::DataError;
use crate::query::QueryBuilder;
use crate::value::{Column, Row};

/// Trait representing a table-backed record.
///
/// Keys may span several columns (join tables usually key on both sides).
///
/// # Example
///
/// ```ignore
/// impl Entity for TagEntity {
///     fn table_name() -> &'static str { "tag" }
///     fn columns() -> &'static [Column] { &[Column::new("id", SqlType::Integer), Column::new("name", SqlType::Text)] }
///     fn key_columns() -> &'static [&'static str] { &["id"] }
///     fn to_row(&self) -> Row { Row::new().with("id", self.id).with("name", self.name.as_str()) }
///     fn from_row(row: &Row) -> Result<Self, DataError> { Ok(Self { id: row.get_i64("id")?, name: row.get_text("name")?.into() }) }
/// }
/// ```
pub trait Entity: Sized + Send + Sync + Unpin + 'static {
    fn table_name() -> &'static str;
    fn columns() -> &'static [Column];
    fn key_columns() -> &'static [&'static str];
    fn to_row(&self) -> Row;
    fn from_row(row: &Row) -> Result<Self, DataError>;

    /// Column names, in declaration order.
    fn column_names() -> Vec<&'static str> {
        Self::columns().iter().map(|c| c.name).collect()
    }

    /// A query selecting exactly this record by its key columns.
    fn key_query(&self) -> Result<QueryBuilder, DataError> {
        let row = self.to_row();
        let mut query = QueryBuilder::for_entity::<Self>();
        for (column, value) in Self::key_columns()
            .iter()
            .zip(row.project(Self::key_columns())?)
        {
            query = query.where_eq(column, value);
        }
        Ok(query)
    }
}
