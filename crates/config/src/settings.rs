use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub push: PushSettings,
    pub watch: WatchSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PushSettings {
    /// Firebase project id, e.g. "koinonia-prod".
    pub project_id: String,
    /// Path to the service-account JSON used to mint the OAuth assertion.
    pub credentials_path: String,
    /// Override for the FCM endpoint (tests, emulators). The real endpoint
    /// is derived from the project id when unset.
    pub endpoint: Option<String>,
    /// Fixed title carried by every push.
    pub title: String,
    /// Icon used when the actor has no photo.
    pub default_icon: String,
    /// Base URL prepended to entity paths to form the deep link.
    pub link_base: String,
    /// Upper bound on concurrent per-token sends within one multicast.
    pub send_concurrency: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WatchSettings {
    /// Collections the change-stream host subscribes to.
    pub likes_collection: String,
    pub comments_collection: String,
    pub members_collection: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("KOINONIA"),
            )
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "koinonia")?
            .set_default("push.project_id", "koinonia-dev")?
            .set_default("push.credentials_path", "config/service-account.json")?
            .set_default("push.endpoint", None::<String>)?
            .set_default("push.title", "Koinonia")?
            .set_default("push.default_icon", "/icons/icon-192.png")?
            .set_default("push.link_base", "https://app.koinonia.church")?
            .set_default("push.send_concurrency", 8)?
            .set_default("watch.likes_collection", "likes")?
            .set_default("watch.comments_collection", "comments")?
            .set_default("watch.members_collection", "congregation_members")?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}
