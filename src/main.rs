use std::sync::Arc;

use clipdeck::config::Config;
use clipdeck::ffmpeg::Ffmpeg;
use clipdeck::routes::{create_routes, AppState};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipdeck=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    config.ensure_dirs()?;
    tracing::info!(
        media_dir = %config.media_dir.display(),
        clip_dir = %config.clip_dir.display(),
        "loaded configuration"
    );

    let addr = config.bind_addr;
    let tool = Arc::new(Ffmpeg::new(config.ffmpeg_program.clone()));
    let state = AppState::new(Arc::new(config), tool);

    let app = create_routes(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    tracing::info!("Listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
