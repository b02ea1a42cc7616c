//! Transaction wrapper used as the unit of work.
//!
//! A [`Tx`] is opened by the caller, handed to services as `&mut`, and
//! finished by the caller with [`Tx::commit`] or [`Tx::rollback`].
//! Dropping it without committing rolls back.

use fave_data::DataError;
use sqlx::{Database, Pool, Transaction};

use crate::error::{SqlxErrorExt, SqlxResult};

/// A wrapper around SQLx [`Transaction`] implementing the fave `Session`.
pub struct Tx<'a, DB: Database>(Transaction<'a, DB>);

impl<DB: Database> Tx<'static, DB> {
    /// Begin a new transaction from the pool.
    pub async fn begin(pool: &Pool<DB>) -> SqlxResult<Self> {
        let tx = pool.begin().await.map_err(SqlxErrorExt::into_data_error)?;
        tracing::trace!("transaction begun");
        Ok(Tx(tx))
    }
}

impl<'a, DB: Database> Tx<'a, DB> {
    /// Returns a mutable reference to the underlying connection.
    pub fn as_mut(&mut self) -> &mut <DB as Database>::Connection {
        &mut *self.0
    }

    pub async fn commit(self) -> Result<(), DataError> {
        self.0.commit().await.map_err(SqlxErrorExt::into_data_error)?;
        tracing::trace!("transaction committed");
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), DataError> {
        self.0
            .rollback()
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        tracing::trace!("transaction rolled back");
        Ok(())
    }
}
