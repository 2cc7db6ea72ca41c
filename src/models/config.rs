use serde::Deserialize;

/// Configuration options for the Chronicle service, loaded from
/// `config.yaml` and `CHRONICLE_*` environment variables.
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Directory uploaded post images are stored in and served from.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// Secret the session and flash cookies are signed with. An empty
    /// value makes the server generate a random key on startup, which
    /// invalidates sessions across restarts.
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "chronicle.db".to_string()
}

fn default_media_root() -> String {
    "media".to_string()
}

fn default_posts_per_page() -> usize {
    crate::pagination::DEFAULT_ITEMS_PER_PAGE
}
