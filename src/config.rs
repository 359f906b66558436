use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub tmdb_api_key: String,
    pub googlemaps_api_key: Option<String>,
    pub vision_api_key: Option<String>,
    pub database_url: String,
    pub status_message: String,
    pub command_prefix: String,
    // Timeout settings
    pub http_timeout_secs: u64,
    pub choice_timeout_secs: u64,
    pub view_timeout_secs: u64,
    pub page_timeout_secs: u64,
    pub dev_guild_id: Option<u64>,
    pub register_commands: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN must be set"))?,
            tmdb_api_key: env::var("TMDB_API_KEY")
                .map_err(|_| anyhow::anyhow!("TMDB_API_KEY must be set"))?,
            googlemaps_api_key: env::var("GOOGLEMAPS_API_KEY").ok(),
            vision_api_key: env::var("VISION_API_KEY").ok(),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "data/merlin.db".to_string()),
            status_message: env::var("STATUS_MESSAGE")
                .unwrap_or_else(|_| "Looking up movies!".to_string()),
            command_prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            choice_timeout_secs: env::var("CHOICE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            view_timeout_secs: env::var("VIEW_TIMEOUT_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap_or(600),
            page_timeout_secs: env::var("PAGE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap_or(120),
            dev_guild_id: env::var("DEV_GUILD_ID").ok().and_then(|id| id.parse().ok()),
            register_commands: env::var("REGISTER_COMMANDS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"[REDACTED]")
            .field("tmdb_api_key", &"[REDACTED]")
            .field(
                "googlemaps_api_key",
                &self.googlemaps_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "vision_api_key",
                &self.vision_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("database_url", &self.database_url)
            .field("status_message", &self.status_message)
            .field("command_prefix", &self.command_prefix)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("choice_timeout_secs", &self.choice_timeout_secs)
            .field("view_timeout_secs", &self.view_timeout_secs)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("dev_guild_id", &self.dev_guild_id)
            .field("register_commands", &self.register_commands)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_config_logic() {
        // 1. Test missing vars
        env::remove_var("DISCORD_TOKEN");
        env::remove_var("TMDB_API_KEY");
        let result = Config::build();
        assert!(result.is_err(), "Should fail when required vars are missing");

        // 2. Test defaults
        env::set_var("DISCORD_TOKEN", "test_token");
        env::set_var("TMDB_API_KEY", "test_tmdb_key");
        let config = Config::build().unwrap();
        assert_eq!(config.choice_timeout_secs, 60);
        assert_eq!(config.view_timeout_secs, 600);
        assert_eq!(config.database_url, "data/merlin.db");

        // 3. Test debug redaction
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("test_token"));
        assert!(!debug_output.contains("test_tmdb_key"));
        assert!(debug_output.contains("[REDACTED]"));

        // Cleanup
        env::remove_var("DISCORD_TOKEN");
        env::remove_var("TMDB_API_KEY");
    }
}
