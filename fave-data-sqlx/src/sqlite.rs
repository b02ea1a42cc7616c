//! SQLite implementation of the fave [`Session`] on top of [`Tx`].

use chrono::{DateTime, Utc};
use fave_core::DatabaseConfig;
use fave_data::session::{one_or_none, FIND_ONE_LIMIT};
use fave_data::{DataError, Entity, QueryBuilder, Row, Session, SqlType, SqlValue};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row as _;

use crate::error::{SqlxErrorExt, SqlxResult};
use crate::tx::Tx;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Open a SQLite pool from the `fave.database` config section.
///
/// Note that every connection to `sqlite::memory:` gets its own database;
/// use `max_connections = 1` for in-memory pools.
pub async fn connect_sqlite(config: &DatabaseConfig) -> SqlxResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    tracing::info!(
        url = %config.url,
        max_connections = config.max_connections,
        "sqlite pool ready"
    );
    Ok(pool)
}

fn bind(query: SqliteQuery<'_>, value: SqlValue) -> SqliteQuery<'_> {
    match value {
        SqlValue::Integer(i) => query.bind(i),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Timestamp(t) => query.bind(t),
    }
}

fn prepare(sql: &str, params: Vec<SqlValue>) -> SqliteQuery<'_> {
    tracing::trace!(%sql, params = params.len(), "prepared statement");
    params.into_iter().fold(sqlx::query(sql), bind)
}

fn decode<E: Entity>(row: &SqliteRow) -> Result<E, DataError> {
    let mut decoded = Row::new();
    for column in E::columns() {
        let value = match column.ty {
            SqlType::Integer => row.try_get::<i64, _>(column.name).map(SqlValue::Integer),
            SqlType::Text => row.try_get::<String, _>(column.name).map(SqlValue::Text),
            SqlType::Timestamp => row
                .try_get::<DateTime<Utc>, _>(column.name)
                .map(SqlValue::Timestamp),
        }
        .map_err(SqlxErrorExt::into_data_error)?;
        decoded.insert(column.name, value);
    }
    E::from_row(&decoded)
}

impl<'c> Session for Tx<'c, Sqlite> {
    async fn find_one<E: Entity>(&mut self, query: &QueryBuilder) -> Result<Option<E>, DataError> {
        let query = query.clone().limit(FIND_ONE_LIMIT);
        let (sql, params) = query.build_select(&E::column_names())?;
        let rows = prepare(&sql, params)
            .fetch_all(self.as_mut())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        one_or_none(rows, &query)?
            .map(|row| decode::<E>(&row))
            .transpose()
    }

    async fn count<E: Entity>(&mut self, query: &QueryBuilder) -> Result<u64, DataError> {
        let (sql, params) = query.build_count()?;
        let row = prepare(&sql, params)
            .fetch_one(self.as_mut())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        let count: i64 = row.try_get(0).map_err(SqlxErrorExt::into_data_error)?;
        u64::try_from(count).map_err(|_| DataError::Decode(format!("negative count {count}")))
    }

    async fn add<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        let columns = E::column_names();
        let values = entity.to_row().project(&columns)?;
        let pairs: Vec<(&str, SqlValue)> = columns.iter().copied().zip(values).collect();
        let (sql, params) = QueryBuilder::for_entity::<E>().build_insert(&pairs)?;
        prepare(&sql, params)
            .execute(self.as_mut())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(())
    }

    async fn delete<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        let (sql, params) = entity.key_query()?.build_delete()?;
        let result = prepare(&sql, params)
            .execute(self.as_mut())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        tracing::trace!(rows = result.rows_affected(), table = E::table_name(), "deleted");
        Ok(())
    }
}
