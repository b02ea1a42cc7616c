use fave_data::Session;

use crate::clock::{Clock, SystemClock};
use crate::error::FavoriteError;
use crate::record::FavoriteRecord;
use crate::resource::{with_favorite_record, Resource, ResourceKind};

/// Checks, sets and unsets favorites.
///
/// Every operation takes the caller's session. Writes are only staged on
/// it; committing or rolling back is the caller's job. The service keeps
/// no state besides its clock, so one instance can be shared freely.
///
/// ```ignore
/// let service = FavoriteService::new();
/// let mut tx = Tx::begin(&pool).await?;
/// service.set_favorite(&mut tx, &Post::new(42), 7).await?;
/// tx.commit().await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct FavoriteService<C = SystemClock> {
    clock: C,
}

impl FavoriteService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> FavoriteService<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Whether `user_id` has favorited `entity`. Never writes.
    pub async fn has_favorited<S, R>(
        &self,
        session: &mut S,
        entity: &R,
        user_id: i64,
    ) -> Result<bool, FavoriteError>
    where
        S: Session,
        R: Resource + ?Sized,
    {
        let (kind, entity_id) = ResourceKind::of(entity)?;
        with_favorite_record!(kind, F => {
            Ok(find::<F, S>(session, entity_id, user_id).await?.is_some())
        })
    }

    /// Mark `entity` as a favorite of `user_id`.
    ///
    /// Does nothing if the favorite already exists; its original time is kept.
    pub async fn set_favorite<S, R>(
        &self,
        session: &mut S,
        entity: &R,
        user_id: i64,
    ) -> Result<(), FavoriteError>
    where
        S: Session,
        R: Resource + ?Sized,
    {
        let (kind, entity_id) = ResourceKind::of(entity)?;
        with_favorite_record!(kind, F => self.set::<F, S>(session, entity_id, user_id).await)
    }

    /// Remove `entity` from the favorites of `user_id`, if present.
    pub async fn unset_favorite<S, R>(
        &self,
        session: &mut S,
        entity: &R,
        user_id: i64,
    ) -> Result<(), FavoriteError>
    where
        S: Session,
        R: Resource + ?Sized,
    {
        let (kind, entity_id) = ResourceKind::of(entity)?;
        with_favorite_record!(kind, F => unset::<F, S>(session, entity_id, user_id).await)
    }

    /// Number of users who have favorited `entity`.
    pub async fn favorite_count<S, R>(
        &self,
        session: &mut S,
        entity: &R,
    ) -> Result<u64, FavoriteError>
    where
        S: Session,
        R: Resource + ?Sized,
    {
        let (kind, entity_id) = ResourceKind::of(entity)?;
        with_favorite_record!(kind, F => {
            Ok(session.count::<F>(&F::favorites_of(entity_id)).await?)
        })
    }

    async fn set<F, S>(
        &self,
        session: &mut S,
        entity_id: i64,
        user_id: i64,
    ) -> Result<(), FavoriteError>
    where
        F: FavoriteRecord,
        S: Session,
    {
        if let Some(existing) = find::<F, S>(session, entity_id, user_id).await? {
            tracing::debug!(
                kind = %F::KIND,
                entity_id,
                user_id,
                since = %existing.time(),
                "favorite already set"
            );
            return Ok(());
        }
        let record = F::build(entity_id, user_id, self.clock.now());
        session.add(&record).await?;
        tracing::debug!(kind = %F::KIND, entity_id, user_id, "favorite staged");
        Ok(())
    }
}

async fn find<F, S>(
    session: &mut S,
    entity_id: i64,
    user_id: i64,
) -> Result<Option<F>, FavoriteError>
where
    F: FavoriteRecord,
    S: Session,
{
    Ok(session.find_one::<F>(&F::lookup(entity_id, user_id)).await?)
}

async fn unset<F, S>(session: &mut S, entity_id: i64, user_id: i64) -> Result<(), FavoriteError>
where
    F: FavoriteRecord,
    S: Session,
{
    match find::<F, S>(session, entity_id, user_id).await? {
        Some(existing) => {
            session.delete(&existing).await?;
            tracing::debug!(kind = %F::KIND, entity_id, user_id, "favorite removal staged");
        }
        None => {
            tracing::debug!(kind = %F::KIND, entity_id, user_id, "no favorite to remove");
        }
    }
    Ok(())
}
