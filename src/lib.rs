pub mod commands;
pub mod config;
pub mod db;
pub mod discord_text;
pub mod embeds;
pub mod paginate;
pub mod prompt;
pub mod tmdb;
pub mod views;
pub mod vision;

/// Custom data passed to all commands
pub struct Data {
    pub config: config::Config,
    pub http_client: reqwest::Client,
    pub tmdb: tmdb::TmdbClient,
    pub vision: vision::VisionClient,
    pub db: db::Database,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
