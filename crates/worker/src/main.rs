mod stream;

use std::sync::Arc;

use koinonia_config::Settings;
use koinonia_db::{connect, indexes::ensure_indexes};
use koinonia_services::dao::{device_token::DeviceTokenDao, notification::NotificationDao};
use koinonia_services::notify::NotificationDispatcher;
use koinonia_services::push::FcmTransport;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::stream::ChangeStreamHost;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "koinonia_worker=debug,koinonia_services=debug,koinonia_db=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!(
        project = %settings.push.project_id,
        "Starting Koinonia notification worker"
    );

    // Connect to MongoDB
    let db = connect(&settings).await?;

    // Ensure indexes
    ensure_indexes(&db).await?;

    // Wire the pipeline: Mongo-backed stores + FCM transport
    let records = Arc::new(NotificationDao::new(&db));
    let tokens = Arc::new(DeviceTokenDao::new(&db));
    let transport = Arc::new(FcmTransport::new(settings.push.clone())?);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        records,
        tokens,
        transport,
        settings.push.clone(),
    ));

    let host = ChangeStreamHost::new(db, settings.watch.clone(), dispatcher);
    host.run().await
}
