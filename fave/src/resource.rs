use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FavoriteError;
use crate::record::FavoriteRecord;

/// Run `$body` with `$record` bound to the [`FavoriteRecord`] type of `$kind`.
///
/// This is the only place a resource kind is tied to its record type.
///
/// ```ignore
/// with_favorite_record!(kind, F => F::table_name())
/// ```
macro_rules! with_favorite_record {
    ($kind:expr, $record:ident => $body:expr) => {
        match $kind {
            $crate::resource::ResourceKind::Post => {
                type $record = $crate::record::PostFavorite;
                $body
            }
        }
    };
}

pub(crate) use with_favorite_record;

/// Resource kind and id of a content entity, as reported by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceInfo<'a> {
    pub kind: &'a str,
    pub id: i64,
}

impl<'a> ResourceInfo<'a> {
    pub fn new(kind: &'a str, id: i64) -> Self {
        Self { kind, id }
    }
}

/// Anything that can report its resource kind and id.
pub trait Resource {
    fn resource_info(&self) -> ResourceInfo<'_>;
}

impl Resource for ResourceInfo<'_> {
    fn resource_info(&self) -> ResourceInfo<'_> {
        *self
    }
}

/// Handle to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
}

impl Post {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Resource for Post {
    fn resource_info(&self) -> ResourceInfo<'_> {
        ResourceInfo::new(ResourceKind::Post.as_str(), self.id)
    }
}

/// Resource kinds that can be favorited.
///
/// To make another kind favoritable, add a variant here (and to
/// [`ALL`](Self::ALL) and `FromStr`), a record type implementing
/// [`FavoriteRecord`], and its arm in `with_favorite_record!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Post,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[ResourceKind::Post];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Post => "post",
        }
    }

    /// The join table recording favorites of this kind.
    pub fn favorite_table(self) -> FavoriteTable {
        with_favorite_record!(self, F => FavoriteTable::of::<F>())
    }

    /// Resolve the kind of `entity`, failing for kinds without a join table.
    pub fn of<R: Resource + ?Sized>(entity: &R) -> Result<(Self, i64), FavoriteError> {
        let info = entity.resource_info();
        Ok((info.kind.parse()?, info.id))
    }
}

impl FromStr for ResourceKind {
    type Err = FavoriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(ResourceKind::Post),
            other => Err(FavoriteError::UnsupportedResourceKind(other.to_string())),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a favorite join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteTable {
    pub table: &'static str,
    /// Foreign key column pointing at the favorited entity.
    pub entity_column: &'static str,
}

impl FavoriteTable {
    pub fn of<F: FavoriteRecord>() -> Self {
        Self {
            table: F::table_name(),
            entity_column: F::entity_column(),
        }
    }
}
