use fave::prelude::*;
use fave_core::{ConfigProperties, DatabaseConfig, FaveConfig, LogConfig};
use fave_data_sqlx::{connect_sqlite, Tx};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = FaveConfig::load("dev").unwrap_or_else(|_| FaveConfig::empty());
    fave_core::init_tracing(&config.section::<LogConfig>().unwrap_or_default());

    let database = if config.contains_key(&DatabaseConfig::key("url")) {
        config.section::<DatabaseConfig>()?
    } else {
        DatabaseConfig::new("sqlite://favorites.db?mode=rwc")
    };
    let pool = connect_sqlite(&database).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let service = FavoriteService::new();
    let post = Post::new(42);
    let user_id = 7;

    // Toggle: favorite if not yet, otherwise remove.
    let mut tx = Tx::begin(&pool).await?;
    let favorited = service.has_favorited(&mut tx, &post, user_id).await?;
    if favorited {
        service.unset_favorite(&mut tx, &post, user_id).await?;
    } else {
        service.set_favorite(&mut tx, &post, user_id).await?;
    }
    let count = service.favorite_count(&mut tx, &post).await?;
    tx.commit().await?;

    tracing::info!(
        post_id = post.id,
        user_id,
        favorited = !favorited,
        favorites = count,
        "favorite toggled"
    );
    Ok(())
}
