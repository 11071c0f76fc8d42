use clap::Parser;

/// Process configuration, from flags or the environment.
#[derive(Debug, Parser)]
#[command(name = "tinylink", about = "A small URL shortener")]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Public base URL used when rendering short links.
    /// Defaults to http://localhost:<port>.
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Connection string for the networked Postgres backend.
    /// When absent, the embedded SQLite backend is used.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path of the embedded SQLite database file.
    /// The reserved value ":memory:" keeps the store ephemeral.
    #[arg(long, env = "DATABASE_PATH", default_value = "data.sqlite")]
    pub database_path: String,
}

impl Config {
    /// The effective public base URL.
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}
