use std::future::Future;

use crate::entity::Entity;
use crate::error::DataError;
use crate::query::QueryBuilder;

/// A caller-owned unit of work.
///
/// Reads see the session's own staged writes. Whether staged writes become
/// durable is decided by whoever opened the session (commit or rollback),
/// never by code that merely receives `&mut` access to it.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait` needed.
pub trait Session: Send {
    /// Fetch the single row matching `query`, or `None`.
    ///
    /// Fails with [`DataError::MultipleRows`] if more than one row matches.
    fn find_one<E: Entity>(
        &mut self,
        query: &QueryBuilder,
    ) -> impl Future<Output = Result<Option<E>, DataError>> + Send;

    fn count<E: Entity>(
        &mut self,
        query: &QueryBuilder,
    ) -> impl Future<Output = Result<u64, DataError>> + Send;

    /// Stage an insert.
    fn add<E: Entity>(&mut self, entity: &E) -> impl Future<Output = Result<(), DataError>> + Send;

    /// Stage the deletion of `entity`, located by its key columns.
    fn delete<E: Entity>(
        &mut self,
        entity: &E,
    ) -> impl Future<Output = Result<(), DataError>> + Send;
}

/// Limit applied by `find_one`: one row to return, one more to detect ambiguity.
pub const FIND_ONE_LIMIT: u64 = 2;

/// Reduce a `find_one` candidate list to the single expected row.
pub fn one_or_none<T>(mut rows: Vec<T>, query: &QueryBuilder) -> Result<Option<T>, DataError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        _ => Err(DataError::MultipleRows(format!(
            "lookup on `{}` expected at most one row",
            query.table()
        ))),
    }
}
