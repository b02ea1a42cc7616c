use chrono::{DateTime, TimeZone, Utc};
use fave_core::DatabaseConfig;
use fave_data_sqlx::prelude::*;
use fave_data_sqlx::connect_sqlite;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq)]
struct Pin {
    board_id: i64,
    user_id: i64,
    label: String,
    pinned_at: DateTime<Utc>,
}

impl Entity for Pin {
    fn table_name() -> &'static str {
        "pin"
    }

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::new("board_id", SqlType::Integer),
            Column::new("user_id", SqlType::Integer),
            Column::new("label", SqlType::Text),
            Column::new("pinned_at", SqlType::Timestamp),
        ];
        COLUMNS
    }

    fn key_columns() -> &'static [&'static str] {
        &["board_id", "user_id"]
    }

    fn to_row(&self) -> Row {
        Row::new()
            .with("board_id", self.board_id)
            .with("user_id", self.user_id)
            .with("label", self.label.as_str())
            .with("pinned_at", self.pinned_at)
    }

    fn from_row(row: &Row) -> Result<Self, DataError> {
        Ok(Self {
            board_id: row.get_i64("board_id")?,
            user_id: row.get_i64("user_id")?,
            label: row.get_text("label")?.to_string(),
            pinned_at: row.get_timestamp("pinned_at")?,
        })
    }
}

fn pin(board_id: i64, user_id: i64) -> Pin {
    Pin {
        board_id,
        user_id,
        label: format!("board {board_id}"),
        pinned_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    }
}

async fn pool() -> SqlitePool {
    let pool = connect_sqlite(&DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
    })
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE pin (
            board_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            label TEXT NOT NULL,
            pinned_at TEXT NOT NULL,
            PRIMARY KEY (board_id, user_id)
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool
}

#[tokio::test]
async fn add_then_find_round_trips_every_column() {
    let pool = pool().await;
    let mut tx = Tx::begin(&pool).await.unwrap();

    tx.add(&pin(1, 7)).await.unwrap();
    let found: Option<Pin> = tx.find_one(&pin(1, 7).key_query().unwrap()).await.unwrap();
    assert_eq!(found, Some(pin(1, 7)));
    tx.commit().await.unwrap();

    let mut tx = Tx::begin(&pool).await.unwrap();
    let found: Option<Pin> = tx.find_one(&pin(1, 7).key_query().unwrap()).await.unwrap();
    assert_eq!(found, Some(pin(1, 7)));
}

#[tokio::test]
async fn rollback_discards_insert() {
    let pool = pool().await;
    let mut tx = Tx::begin(&pool).await.unwrap();
    tx.add(&pin(1, 7)).await.unwrap();
    tx.rollback().await.unwrap();

    let mut tx = Tx::begin(&pool).await.unwrap();
    let found: Option<Pin> = tx.find_one(&pin(1, 7).key_query().unwrap()).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn dropped_tx_rolls_back() {
    let pool = pool().await;
    {
        let mut tx = Tx::begin(&pool).await.unwrap();
        tx.add(&pin(1, 7)).await.unwrap();
    }

    let mut tx = Tx::begin(&pool).await.unwrap();
    assert_eq!(tx.count::<Pin>(&QueryBuilder::new("pin")).await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_key_maps_to_unique_violation() {
    let pool = pool().await;
    let mut tx = Tx::begin(&pool).await.unwrap();
    tx.add(&pin(1, 7)).await.unwrap();

    let err = tx.add(&pin(1, 7)).await.unwrap_err();
    assert!(matches!(err, DataError::UniqueViolation(_)), "{err}");
}

#[tokio::test]
async fn delete_and_count() {
    let pool = pool().await;
    let mut tx = Tx::begin(&pool).await.unwrap();
    for user_id in 1..=3 {
        tx.add(&pin(9, user_id)).await.unwrap();
    }
    let by_board = QueryBuilder::for_entity::<Pin>().where_eq("board_id", 9_i64);
    assert_eq!(tx.count::<Pin>(&by_board).await.unwrap(), 3);

    tx.delete(&pin(9, 2)).await.unwrap();
    assert_eq!(tx.count::<Pin>(&by_board).await.unwrap(), 2);

    // Deleting an absent row is not an error.
    tx.delete(&pin(9, 2)).await.unwrap();
    tx.commit().await.unwrap();
}

#[tokio::test]
async fn find_one_rejects_ambiguous_predicate() {
    let pool = pool().await;
    let mut tx = Tx::begin(&pool).await.unwrap();
    tx.add(&pin(9, 1)).await.unwrap();
    tx.add(&pin(9, 2)).await.unwrap();

    let by_board = QueryBuilder::for_entity::<Pin>().where_eq("board_id", 9_i64);
    let err = tx.find_one::<Pin>(&by_board).await.unwrap_err();
    assert!(matches!(err, DataError::MultipleRows(_)));
}

#[tokio::test]
async fn missing_table_surfaces_database_error() {
    let pool = connect_sqlite(&DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
    })
    .await
    .unwrap();
    let mut tx = Tx::begin(&pool).await.unwrap();
    let err = tx.add(&pin(1, 1)).await.unwrap_err();
    assert!(matches!(err, DataError::Database(_)));
}
