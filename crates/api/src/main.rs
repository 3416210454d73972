use std::sync::Arc;

use anyhow::Result;
use api::{build_router, ApiState};
use axum::Router;
use chrono::{Duration, Utc};
use common::{config::AppConfig, logging};
use engine::Awarder;
use store::{MemStore, MemeRow, Stores};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init_logging("api", &config.observability);

    let store = Arc::new(MemStore::new());
    if config.api.demo_seed {
        seed_demo_data(&store).await?;
        info!("seeded demo users and memes");
    }

    let stores: Arc<dyn Stores> = store;
    let awarder = Arc::new(Awarder::new(stores.clone()));
    let metrics_path: &'static str =
        Box::leak(config.observability.metrics_path.clone().into_boxed_str());
    let state = Arc::new(ApiState {
        stores,
        awarder,
        metrics_path,
        default_feed_limit: config.feed.default_limit,
        max_feed_limit: config.feed.max_limit,
    });
    let app: Router = build_router(state);

    let addr: std::net::SocketAddr = config.api.bind.parse()?;
    info!("api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed_demo_data(store: &MemStore) -> Result<()> {
    let now = Utc::now();
    for (id, name) in [(1, "alice"), (2, "bob"), (3, "carol")] {
        store.seed_user(store::mem::user_row(id, name, now)).await;
    }
    let memes = [
        (1, 1, 36),
        (2, 1, 20),
        (3, 2, 8),
        (4, 3, 2),
        (5, 2, 0),
    ];
    for (id, user_id, hours_ago) in memes {
        store
            .record_meme(MemeRow {
                id,
                user_id,
                likes_count: 0,
                created_at: now - Duration::hours(hours_ago),
            })
            .await?;
    }
    for (meme_id, liker) in [(1, 2), (1, 3), (2, 3), (3, 1), (4, 1), (4, 2)] {
        store.record_like(meme_id, liker).await?;
    }
    for (meme_id, author) in [(1, 3), (3, 1), (4, 2)] {
        store.record_comment(meme_id, author).await?;
    }
    Ok(())
}
