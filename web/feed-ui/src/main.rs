use anyhow::{Context, Result};
use feed_ui::controller::events;
use feed_ui::controller::{SubmitTrigger, UiEvent};
use feed_ui::render::ids;
use feed_ui::store::{seed, InMemoryPostStore, PostStore};
use feed_ui::{metrics, Config, FeedApp};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load config")?;
    info!(
        env = %config.app.env,
        fetch_latency_ms = config.store.fetch_latency_ms,
        comment_refresh = ?config.feed.comment_refresh,
        "Starting feed-ui"
    );

    let store = Arc::new(InMemoryPostStore::with_posts(
        &config.store,
        &config.viewer,
        seed::demo_posts(chrono::Utc::now()),
    ));

    let mut app = FeedApp::new(store.clone(), &config);
    app.initialize().await;

    // Replay a short interaction session through the event queue
    let (sender, rx) = events::channel(config.feed.event_queue_capacity);
    let session = tokio::spawn(app.run(rx));

    let script = vec![
        UiEvent::LikeClicked(1),
        UiEvent::CommentInput {
            post_id: 1,
            text: "What a view!".to_string(),
        },
        UiEvent::CommentSubmitted {
            post_id: 1,
            trigger: SubmitTrigger::Button,
        },
        UiEvent::LikeClicked(2),
        UiEvent::OpenCreatePost,
        UiEvent::ImageSelected("data:image/png;base64,iVBORw0KGgo=".to_string()),
        UiEvent::CaptionInput("Hello from the demo".to_string()),
        UiEvent::CreatePostSubmitted,
    ];
    for event in script {
        sender.send(event).await.context("event loop stopped early")?;
    }
    drop(sender);

    let app = session.await.context("event loop panicked")?;

    let feed = app
        .document()
        .html(ids::POSTS_CONTAINER)
        .context("feed container missing")?;
    println!("{}", feed);

    let snapshot = store.list().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!("{}", metrics::gather_text());

    Ok(())
}
