use crate::commands::{get_all_application_commands, CommandContext};
use crate::shutdown;
use bancheck::components::ban_check::replies::error_embed;
use bancheck::components::liveness::{BotStatus, LivenessHandle, LivenessServer};
use bancheck::components::{BanApiClient, BanChecker, InMemoryLanguageStore, LanguagePreferences};
use bancheck::config::Config;
use bancheck::error::Error;
use bancheck::utils::i18n::{self, Message};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,poise=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the configuration and check the translation tables
pub fn load_config() -> miette::Result<Arc<Config>> {
    i18n::verify_translations()?;

    match Config::load() {
        Ok(config) => Ok(Arc::new(config)),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the liveness endpoint; a bind failure does not stop the bot
pub fn start_liveness(config: &Config, status: BotStatus) -> Option<LivenessHandle> {
    match LivenessServer::bind(&config.liveness_addr(), status).and_then(LivenessServer::spawn) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("Failed to start liveness endpoint: {:?}", e);
            None
        }
    }
}

/// Initialize and start the Discord bot
pub async fn start_bot(config: Arc<Config>) -> miette::Result<()> {
    let status = BotStatus::new();
    let liveness = start_liveness(&config, status.clone());

    // Build the command services
    let lookup = BanApiClient::new(
        &config.ban_api_url,
        Duration::from_secs(config.ban_api_timeout_secs),
    )
    .map_err(Error::from)?;
    let preferences = LanguagePreferences::new(
        Arc::new(InMemoryLanguageStore::new()),
        config.default_language,
    );
    let checker = BanChecker::new(Arc::new(lookup), preferences, config.period_unit);
    let command_data = CommandContext::new(Arc::clone(&config), checker);

    // Set up framework options
    let options = poise::FrameworkOptions {
        commands: get_all_application_commands(),
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    };

    // Set intents
    let intents = serenity::GatewayIntents::non_privileged();

    let activity = config.activity.clone();
    let guild_id = config.guild_id;

    let client_result = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(poise::Framework::new(
            options,
            move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("{} is connected!", ready.user.name);
                    status.mark_connected(&ready.user.name);

                    // Set the bot's status
                    ctx.set_presence(
                        Some(serenity::ActivityData::playing(&activity)),
                        serenity::OnlineStatus::Online,
                    );
                    info!("Setting activity to {}", activity);

                    register_commands(ctx, &framework.options().commands, guild_id).await;

                    Ok(command_data)
                })
            },
        ))
        .await;

    // Start the bot
    info!("Starting bot...");
    let mut client = client_result.map_err(Error::from)?;
    let shard_manager = Arc::clone(&client.shard_manager);

    // Create shutdown channel and spawn signal handler task
    let (shutdown_send, shutdown_recv) = oneshot::channel();
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send).await;
    });

    // Create a separate task to handle the client
    let client_handle = tokio::spawn(async move { client.start().await.map_err(Error::from) });

    // Wait for either the client to end or a shutdown signal
    let result: miette::Result<()> = tokio::select! {
        result = client_handle => {
            info!("Bot process ended");
            match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => {
                    error!("Client task error: {:?}", e);
                    Err(Error::Other(format!("Client task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down bot...");
            shard_manager.shutdown_all().await;
            Ok(())
        }
    };

    if let Some(liveness) = liveness {
        if let Err(e) = tokio::task::spawn_blocking(move || liveness.shutdown()).await {
            warn!("Liveness shutdown task failed: {:?}", e);
        } else {
            info!("Liveness endpoint shut down");
        }
    }

    result
}

/// Sync slash commands, scoped to a guild when one is configured
async fn register_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<CommandContext, Error>],
    guild_id: Option<u64>,
) {
    let result = match guild_id {
        Some(id) => {
            poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id)).await
        }
        None => poise::builtins::register_globally(ctx, commands).await,
    };

    match result {
        Ok(()) => info!("Slash commands registered successfully"),
        Err(e) => error!("Failed to register slash commands: {:?}", e),
    }
}

/// Handle errors from commands
async fn on_error(error: poise::FrameworkError<'_, CommandContext, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Error during setup: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);

            // Details stay in the logs; the user gets a generic message
            let language = ctx
                .data()
                .checker
                .preferences()
                .language_for(ctx.author().id)
                .await;

            if let Err(e) = ctx
                .send(
                    poise::CreateReply::default()
                        .embed(error_embed(
                            language,
                            &i18n::text(language, Message::ErrorGeneric),
                        ))
                        .ephemeral(true),
                )
                .await
            {
                error!("Error while sending error message: {:?}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {:?}", e);
            }
        }
    }
}
