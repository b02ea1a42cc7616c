use chrono::{DateTime, Utc};
use fave_data::{Column, DataError, Entity, QueryBuilder, Row, SqlType};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;

/// Column holding the favoriting user's id in every favorite table.
pub const USER_COLUMN: &str = "user_id";
/// Column holding the time the favorite was set.
pub const TIME_COLUMN: &str = "time";

/// A join row marking one entity as a favorite of one user.
///
/// One implementation per favoritable [`ResourceKind`].
pub trait FavoriteRecord: Entity {
    const KIND: ResourceKind;

    /// Foreign key column pointing at the favorited entity.
    fn entity_column() -> &'static str;

    fn build(entity_id: i64, user_id: i64, time: DateTime<Utc>) -> Self;

    fn entity_id(&self) -> i64;
    fn user_id(&self) -> i64;
    fn time(&self) -> DateTime<Utc>;

    /// Query locating the record for `(entity_id, user_id)`.
    fn lookup(entity_id: i64, user_id: i64) -> QueryBuilder {
        Self::favorites_of(entity_id).where_eq(USER_COLUMN, user_id)
    }

    /// Query matching every record for `entity_id`.
    fn favorites_of(entity_id: i64) -> QueryBuilder {
        QueryBuilder::for_entity::<Self>().where_eq(Self::entity_column(), entity_id)
    }
}

/// Row of `post_favorite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFavorite {
    pub post_id: i64,
    pub user_id: i64,
    pub time: DateTime<Utc>,
}

impl PostFavorite {
    const COLUMNS: &'static [Column] = &[
        Column::new("post_id", SqlType::Integer),
        Column::new(USER_COLUMN, SqlType::Integer),
        Column::new(TIME_COLUMN, SqlType::Timestamp),
    ];
}

impl Entity for PostFavorite {
    fn table_name() -> &'static str {
        "post_favorite"
    }

    fn columns() -> &'static [Column] {
        Self::COLUMNS
    }

    fn key_columns() -> &'static [&'static str] {
        &["post_id", USER_COLUMN]
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("post_id", self.post_id)
            .with(USER_COLUMN, self.user_id)
            .with(TIME_COLUMN, self.time)
    }

    fn from_row(row: &Row) -> Result<Self, DataError> {
        Ok(Self {
            post_id: row.get_i64("post_id")?,
            user_id: row.get_i64(USER_COLUMN)?,
            time: row.get_timestamp(TIME_COLUMN)?,
        })
    }
}

impl FavoriteRecord for PostFavorite {
    const KIND: ResourceKind = ResourceKind::Post;

    fn entity_column() -> &'static str {
        "post_id"
    }

    fn build(entity_id: i64, user_id: i64, time: DateTime<Utc>) -> Self {
        Self {
            post_id: entity_id,
            user_id,
            time,
        }
    }

    fn entity_id(&self) -> i64 {
        self.post_id
    }

    fn user_id(&self) -> i64 {
        self.user_id
    }

    fn time(&self) -> DateTime<Utc> {
        self.time
    }
}
