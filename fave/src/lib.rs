//! # fave
//!
//! Favorite toggling between users and content entities.
//!
//! [`FavoriteService`] checks, sets and unsets the join record linking a
//! user to an entity (currently only posts). It never opens, commits or
//! rolls back anything itself: every call receives the caller's
//! [`Session`](fave_data::Session), e.g. a [`MemorySession`](fave_data::MemorySession)
//! or, with the `sqlite` feature, a `fave_data_sqlx::Tx`.
//!
//! # Feature flags
//!
//! | Feature  | Default | Crate                          |
//! |----------|---------|--------------------------------|
//! | `sqlite` | no      | `fave-data-sqlx` (SQLite `Tx`) |

pub mod clock;
pub mod error;
pub mod record;
pub mod resource;
pub mod service;

pub use clock::{Clock, MockClock, SystemClock};
pub use error::FavoriteError;
pub use record::{FavoriteRecord, PostFavorite};
pub use resource::{FavoriteTable, Post, Resource, ResourceInfo, ResourceKind};
pub use service::FavoriteService;

pub use fave_core;
pub use fave_data;

#[cfg(feature = "sqlite")]
pub use fave_data_sqlx;

pub mod prelude {
    //! Re-exports of the types needed to toggle favorites.
    pub use crate::{
        FavoriteError, FavoriteRecord, FavoriteService, Post, PostFavorite, Resource,
        ResourceInfo, ResourceKind,
    };
    pub use fave_data::{MemoryStore, Session};
}
