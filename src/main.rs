use std::time::Duration;

use merlin::commands::{celebrity, maps, movie, ocr, roleplay};
use merlin::{config::Config, Data, Error};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let message = error.to_string();
            error!("Command {} failed: {message}", ctx.command().name);
            if let Err(err) = ctx.say(message).await {
                error!("Failed to report command error: {err}");
            }
        }
        poise::FrameworkError::CooldownHit {
            remaining_cooldown,
            ctx,
            ..
        } => {
            let notice = format!(
                "Too fast! Try again in {} seconds.",
                remaining_cooldown.as_secs().max(1)
            );
            if let Err(err) = ctx.say(notice).await {
                error!("Failed to report cooldown: {err}");
            }
        }
        error => {
            if let Err(err) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {err}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    let discord_token = config.discord_token.clone();
    let command_prefix = config.command_prefix.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                movie::movie(),
                movie::moviesearch(),
                movie::tvshowsearch(),
                celebrity::celebrity(),
                maps::map(),
                ocr::ocr(),
                roleplay::baka(),
                roleplay::bully(),
                roleplay::cry(),
                roleplay::cuddle(),
                roleplay::feed(),
                roleplay::highfive(),
                roleplay::hug(),
                roleplay::kiss(),
                roleplay::nom(),
                roleplay::pat(),
                roleplay::poke(),
                roleplay::punch(),
                roleplay::slap(),
                roleplay::smug(),
                roleplay::tickle(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(command_prefix),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready!");
                if config.register_commands {
                    if let Some(guild_id) = config.dev_guild_id {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                    } else {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                    }
                }

                // Set bot status
                ctx.set_activity(Some(serenity::ActivityData::custom(&config.status_message)));

                let http_client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.http_timeout_secs))
                    .build()?;
                let tmdb =
                    merlin::tmdb::TmdbClient::new(http_client.clone(), config.tmdb_api_key.clone());
                let vision = merlin::vision::VisionClient::new(
                    http_client.clone(),
                    config.vision_api_key.clone(),
                );
                let db = merlin::db::Database::new(&config)?;
                db.execute_init()?;

                Ok(Data {
                    config,
                    http_client,
                    tmdb,
                    vision,
                    db,
                })
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MESSAGES;

    let mut client = serenity::ClientBuilder::new(&discord_token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    info!("Starting bot...");
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    Ok(())
}
