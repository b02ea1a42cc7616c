//! # fave-data-sqlx
//!
//! [SQLx](https://github.com/launchbadge/sqlx) backend for the fave data
//! layer. It depends on [`fave_data`] for the abstract traits and adds the
//! transaction wrapper, the SQLite `Session` implementation, pool setup
//! and error bridging.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Tx`] | Transaction wrapper; implements `Session` for SQLite |
//! | [`SqlxErrorExt`] | Converts `sqlx::Error` into `DataError` (`.into_data_error()`) |
//! | [`connect_sqlite`] | Builds a pool from `fave_core::DatabaseConfig` |
//!
//! ```ignore
//! let pool = connect_sqlite(&config.section::<DatabaseConfig>()?).await?;
//! let mut tx = Tx::begin(&pool).await?;
//! service.set_favorite(&mut tx, &post, user_id).await?;
//! tx.commit().await?;
//! ```

pub mod error;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod tx;

pub use error::{SqlxErrorExt, SqlxResult};
#[cfg(feature = "sqlite")]
pub use sqlite::connect_sqlite;
pub use tx::Tx;

/// Re-exports of the most commonly used types from both `fave-data` and this crate.
pub mod prelude {
    pub use crate::{SqlxErrorExt, Tx};
    pub use fave_data::prelude::*;
}
