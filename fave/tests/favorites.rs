use chrono::{TimeDelta, TimeZone, Utc};
use fave::prelude::*;
use fave::{Clock, MockClock};
use fave_data::{DataError, Entity, MemorySession, QueryBuilder};

fn clock() -> MockClock {
    MockClock::new(Utc.with_ymd_and_hms(2020, 5, 17, 12, 0, 0).unwrap())
}

fn committed(store: &MemoryStore) -> Vec<PostFavorite> {
    store
        .rows(PostFavorite::table_name())
        .unwrap()
        .iter()
        .map(|row| PostFavorite::from_row(row).unwrap())
        .collect()
}

/// Session wrapper recording how often it was touched.
struct Probe {
    inner: MemorySession,
    calls: usize,
}

impl Session for Probe {
    async fn find_one<E: Entity>(&mut self, query: &QueryBuilder) -> Result<Option<E>, DataError> {
        self.calls += 1;
        self.inner.find_one(query).await
    }

    async fn count<E: Entity>(&mut self, query: &QueryBuilder) -> Result<u64, DataError> {
        self.calls += 1;
        self.inner.count::<E>(query).await
    }

    async fn add<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        self.calls += 1;
        self.inner.add(entity).await
    }

    async fn delete<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        self.calls += 1;
        self.inner.delete(entity).await
    }
}

/// Session whose every call fails.
struct Broken;

impl Session for Broken {
    async fn find_one<E: Entity>(&mut self, _: &QueryBuilder) -> Result<Option<E>, DataError> {
        Err(DataError::Other("connection reset".into()))
    }

    async fn count<E: Entity>(&mut self, _: &QueryBuilder) -> Result<u64, DataError> {
        Err(DataError::Other("connection reset".into()))
    }

    async fn add<E: Entity>(&mut self, _: &E) -> Result<(), DataError> {
        Err(DataError::Other("connection reset".into()))
    }

    async fn delete<E: Entity>(&mut self, _: &E) -> Result<(), DataError> {
        Err(DataError::Other("connection reset".into()))
    }
}

#[tokio::test]
async fn set_then_check() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());
    let post = Post::new(42);

    let mut session = store.session();
    assert!(!service.has_favorited(&mut session, &post, 7).await.unwrap());
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    assert!(service.has_favorited(&mut session, &post, 7).await.unwrap());
    session.commit().unwrap();

    assert_eq!(
        committed(&store),
        vec![PostFavorite::build(42, 7, clock().now())]
    );
}

#[tokio::test]
async fn set_twice_keeps_one_record_and_original_time() {
    let store = MemoryStore::new();
    let clock = clock();
    let service = FavoriteService::with_clock(clock.clone());
    let post = Post::new(42);
    let first = clock.now();

    let mut session = store.session();
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    session.commit().unwrap();

    clock.advance(TimeDelta::hours(3));
    let mut session = store.session();
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    assert_eq!(session.pending(), 0);
    session.commit().unwrap();

    let rows = committed(&store);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].time, first);
}

#[tokio::test]
async fn set_twice_in_one_session_stages_once() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());
    let post = Post::new(42);

    let mut session = store.session();
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    assert_eq!(session.pending(), 1);
    session.commit().unwrap();
    assert_eq!(committed(&store).len(), 1);
}

#[tokio::test]
async fn unset_removes_favorite() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());
    let post = Post::new(42);

    let mut session = store.session();
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    session.commit().unwrap();

    let mut session = store.session();
    service.unset_favorite(&mut session, &post, 7).await.unwrap();
    assert!(!service.has_favorited(&mut session, &post, 7).await.unwrap());
    session.commit().unwrap();

    assert!(committed(&store).is_empty());
}

#[tokio::test]
async fn unset_without_favorite_is_a_no_op() {
    let store = MemoryStore::new();
    let service = FavoriteService::new();

    let mut session = store.session();
    service
        .unset_favorite(&mut session, &Post::new(42), 7)
        .await
        .unwrap();
    assert_eq!(session.pending(), 0);
    session.commit().unwrap();
    assert!(committed(&store).is_empty());
}

#[tokio::test]
async fn set_unset_set_gives_fresh_time() {
    let store = MemoryStore::new();
    let clock = clock();
    let service = FavoriteService::with_clock(clock.clone());
    let post = Post::new(42);

    let mut session = store.session();
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    service.unset_favorite(&mut session, &post, 7).await.unwrap();
    clock.advance(TimeDelta::minutes(5));
    service.set_favorite(&mut session, &post, 7).await.unwrap();
    session.commit().unwrap();

    let rows = committed(&store);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].time, clock.now());
}

#[tokio::test]
async fn favorites_are_per_user_and_per_post() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());

    let mut session = store.session();
    service
        .set_favorite(&mut session, &Post::new(42), 7)
        .await
        .unwrap();
    assert!(!service
        .has_favorited(&mut session, &Post::new(42), 8)
        .await
        .unwrap());
    assert!(!service
        .has_favorited(&mut session, &Post::new(43), 7)
        .await
        .unwrap());

    service
        .set_favorite(&mut session, &Post::new(42), 8)
        .await
        .unwrap();
    service
        .unset_favorite(&mut session, &Post::new(42), 7)
        .await
        .unwrap();
    assert!(service
        .has_favorited(&mut session, &Post::new(42), 8)
        .await
        .unwrap());
}

#[tokio::test]
async fn staged_favorite_invisible_until_commit() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());
    let post = Post::new(42);

    let mut writer = store.session();
    service.set_favorite(&mut writer, &post, 7).await.unwrap();

    let mut reader = store.session();
    assert!(!service.has_favorited(&mut reader, &post, 7).await.unwrap());

    writer.commit().unwrap();
    let mut reader = store.session();
    assert!(service.has_favorited(&mut reader, &post, 7).await.unwrap());
}

#[tokio::test]
async fn rollback_discards_favorite() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());

    let mut session = store.session();
    service
        .set_favorite(&mut session, &Post::new(42), 7)
        .await
        .unwrap();
    session.rollback();

    assert!(committed(&store).is_empty());
}

#[tokio::test]
async fn counts_favorites_of_one_post() {
    let store = MemoryStore::new();
    let service = FavoriteService::with_clock(clock());

    let mut session = store.session();
    for user_id in [7, 8, 9] {
        service
            .set_favorite(&mut session, &Post::new(42), user_id)
            .await
            .unwrap();
    }
    service
        .set_favorite(&mut session, &Post::new(43), 7)
        .await
        .unwrap();

    assert_eq!(
        service
            .favorite_count(&mut session, &Post::new(42))
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        service
            .favorite_count(&mut session, &Post::new(44))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn unsupported_kind_fails_before_touching_session() {
    let store = MemoryStore::new();
    let service = FavoriteService::new();
    let tag = ResourceInfo::new("tag", 42);
    let mut probe = Probe {
        inner: store.session(),
        calls: 0,
    };

    let err = service
        .has_favorited(&mut probe, &tag, 7)
        .await
        .unwrap_err();
    assert!(matches!(&err, FavoriteError::UnsupportedResourceKind(k) if k == "tag"));
    let err = service.set_favorite(&mut probe, &tag, 7).await.unwrap_err();
    assert!(matches!(err, FavoriteError::UnsupportedResourceKind(_)));
    let err = service
        .unset_favorite(&mut probe, &tag, 7)
        .await
        .unwrap_err();
    assert!(matches!(err, FavoriteError::UnsupportedResourceKind(_)));
    let err = service.favorite_count(&mut probe, &tag).await.unwrap_err();
    assert!(matches!(err, FavoriteError::UnsupportedResourceKind(_)));

    assert_eq!(probe.calls, 0);
    assert_eq!(probe.inner.pending(), 0);
}

#[tokio::test]
async fn post_kind_goes_through_session() {
    let store = MemoryStore::new();
    let service = FavoriteService::new();
    let mut probe = Probe {
        inner: store.session(),
        calls: 0,
    };

    service
        .set_favorite(&mut probe, &ResourceInfo::new("post", 42), 7)
        .await
        .unwrap();
    // lookup, then insert
    assert_eq!(probe.calls, 2);
    assert_eq!(probe.inner.pending(), 1);
}

#[tokio::test]
async fn session_errors_pass_through() {
    let service = FavoriteService::new();
    let err = service
        .has_favorited(&mut Broken, &Post::new(42), 7)
        .await
        .unwrap_err();
    assert!(matches!(err, FavoriteError::Data(DataError::Other(_))));
    assert!(std::error::Error::source(&err).is_some());

    let err = service
        .set_favorite(&mut Broken, &Post::new(42), 7)
        .await
        .unwrap_err();
    assert!(matches!(err, FavoriteError::Data(_)));
}
