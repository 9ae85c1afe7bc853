//! Gateway client and event subscription.

use std::sync::Arc;
use std::time::Duration;

use badge_core::{CommandRouter, Services, WebhookSettings};
use serenity::all::{
    Client, Context, EventHandler, GatewayIntents, Http, Interaction, Ready, ShardManager,
};
use serenity::async_trait;
use serenity::prelude::TypeMapKey;
use tracing::{debug, error, info};

use crate::config::BotConfig;
use crate::error::{DiscordError, Result};
use crate::interaction::{inbound_command, InteractionReply};
use crate::webhook::DiscordWebhookClient;

/// Type map key for the shard manager, used to read gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Heartbeat round-trip of the shard that delivered the event.
async fn gateway_latency(ctx: &Context) -> Option<Duration> {
    let data = ctx.data.read().await;
    let manager = data.get::<ShardManagerContainer>()?;
    let runners = manager.runners.lock().await;
    runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
}

/// Serenity event handler that feeds command interactions to the router.
pub struct Handler {
    router: CommandRouter,
}

impl Handler {
    pub fn new(router: CommandRouter) -> Self {
        Self { router }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.tag(),
            guilds = ready.guilds.len(),
            "Bot is ready, serving slash commands"
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };

        let latency = gateway_latency(&ctx).await;
        let inbound = inbound_command(&command, latency);
        let reply = InteractionReply::new(&ctx.http, &command);
        self.router.handle(inbound, &reply).await;
    }
}

/// The Discord bot.
pub struct BadgeBot {
    config: BotConfig,
    router: CommandRouter,
}

impl BadgeBot {
    /// Create the bot and its command router from a resolved config.
    pub fn new(config: BotConfig) -> Self {
        let gateway = DiscordWebhookClient::new(config.api_base.clone());
        let settings = WebhookSettings::new(config.webhook_url.clone());
        let router = CommandRouter::new(Services::new(Arc::new(gateway), settings));
        Self { config, router }
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Check the token and return the bot's tag.
    pub async fn get_me(&self) -> Result<String> {
        let http = Http::new(&self.config.token);
        let me = http
            .get_current_user()
            .await
            .map_err(|e| DiscordError::Authentication(e.to_string()))?;
        Ok(me.tag())
    }

    /// Connect to the gateway and serve commands until the connection ends.
    pub async fn start(self) -> Result<()> {
        info!("Starting Discord bot...");

        let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
        let mut client = Client::builder(&self.config.token, intents)
            .event_handler(Handler::new(self.router))
            .await?;

        {
            let mut data = client.data.write().await;
            data.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
        }

        if let Err(e) = client.start().await {
            error!(error = %e, "Discord client stopped");
            return Err(DiscordError::Gateway(e.to_string()));
        }

        info!("Bot stopped");
        Ok(())
    }
}
