//! # fave-data
//!
//! Backend-agnostic data access for fave: the [`Entity`] mapping trait,
//! the [`QueryBuilder`] predicate/SQL builder, the [`Session`]
//! unit-of-work trait, and an in-memory implementation of it
//! ([`MemoryStore`] / [`MemorySession`]). SQL backends live in separate
//! crates (`fave-data-sqlx`).

pub mod entity;
pub mod error;
pub mod memory;
pub mod query;
pub mod session;
pub mod value;

pub use entity::Entity;
pub use error::DataError;
pub use memory::{MemorySession, MemoryStore};
pub use query::{QueryBuilder, QueryError};
pub use session::Session;
pub use value::{Column, Row, SqlType, SqlValue};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{Column, DataError, Entity, QueryBuilder, Row, Session, SqlType, SqlValue};
}
