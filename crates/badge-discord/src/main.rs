//! Badge bot binary.
//!
//! Start the bot with:
//! ```bash
//! DISCORD_BOT_TOKEN=xxx cargo run -p badge-discord
//! ```

use badge_discord::config::{self, API_BASE_ENV, BOT_TOKEN_ENV, WEBHOOK_URL_ENV};
use badge_discord::webhook::DEFAULT_API_BASE;
use badge_discord::{BadgeBot, BotConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Badge bot - answers a handful of slash commands on Discord
#[derive(Parser, Debug)]
#[command(name = "badge-discord")]
#[command(about = "Discord slash-command bot with webhook helpers")]
struct Args {
    /// Bot token
    #[arg(long, env = BOT_TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Webhook URL used by the /webhook-* commands
    #[arg(long, env = WEBHOOK_URL_ENV, hide_env_values = true)]
    webhook_url: Option<String>,

    /// Discord REST API base for webhook calls
    #[arg(long, env = API_BASE_ENV, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Env files must be loaded before clap reads env-backed arguments
    config::load_env_files();

    let args = Args::parse();

    let filter = match args.verbose {
        0 => "badge_discord=info,badge_core=info,serenity=warn",
        1 => "badge_discord=debug,badge_core=debug,serenity=info",
        2 => "badge_discord=trace,badge_core=trace,serenity=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match BotConfig::new(args.token, args.webhook_url) {
        Ok(config) => config.with_api_base(args.api_base),
        Err(e) => {
            tracing::error!(error = %e, "Missing configuration");
            return Err(e.into());
        }
    };

    if !config.has_webhook() {
        tracing::warn!("DISCORD_WEBHOOK_URL not set; webhook commands will report it as not configured");
    }

    let bot = BadgeBot::new(config);

    match bot.get_me().await {
        Ok(tag) => {
            tracing::info!(user = %tag, "Bot authenticated");
            println!("\n[robot] Badge Bot");
            println!("   Logged in as: {}", tag);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to log in");
            return Err(e.into());
        }
    }

    println!("   Press Ctrl+C to stop\n");

    bot.start().await?;

    Ok(())
}
