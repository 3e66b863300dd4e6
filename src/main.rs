mod commands;
mod gateway;
mod handler;
#[cfg(test)]
mod testing;

use babel_channels::discord::DiscordChannel;
use babel_core::{config, languages::languages_for_flag};
use clap::{Parser, Subcommand};
use handler::{HandlerSettings, ReactionHandler};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "babel",
    version,
    about = "Babel — flag-reaction translation bot for Discord"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and start translating reactions.
    Start,
    /// Show configuration and check translator availability.
    Status,
    /// Translate text as if it had been reacted to with a flag.
    Translate {
        /// Flag emoji, e.g. 🇫🇷.
        flag: String,
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List supported flags and their languages.
    Flags,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env(|key| std::env::var(key).ok());

    let _guard = init_tracing(&cfg.babel.log_level, &cfg.babel.log_file)?;

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let translator = babel_translate::build_translator(&cfg.translator)?;
            if !translator.is_available().await {
                tracing::warn!(
                    "translator '{}' did not answer the availability probe; continuing",
                    translator.name()
                );
            }

            let channel: Arc<dyn babel_core::traits::Channel> =
                Arc::new(DiscordChannel::new(cfg.discord.clone()));
            let handler = Arc::new(ReactionHandler::new(
                channel.clone(),
                translator,
                HandlerSettings::from_config(&cfg),
            ));

            println!("{} — connecting to Discord...", cfg.babel.name);
            let gw = Arc::new(gateway::Gateway::new(
                channel,
                handler,
                cfg.discord.command_prefix.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            println!("{} — Status Check\n", cfg.babel.name);
            println!("Config: {}", cli.config);
            println!(
                "  discord token: {}",
                if cfg.discord.bot_token.is_empty() {
                    "missing (set DISCORD_BOT_TOKEN)"
                } else {
                    "configured"
                }
            );
            println!("  command prefix: {}", cfg.discord.command_prefix);
            println!();

            cfg.validate_translator()?;
            let translator = babel_translate::build_translator(&cfg.translator)?;
            let available = translator.is_available().await;
            println!(
                "  {}: {}",
                translator.name(),
                if available { "available" } else { "unreachable" }
            );
        }
        Commands::Translate { flag, text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: babel translate <flag> <text>");
            }
            let Some(targets) = languages_for_flag(&flag) else {
                anyhow::bail!("'{flag}' is not a supported flag. Run `babel flags` for the list.");
            };

            cfg.validate_translator()?;
            let translator = babel_translate::build_translator(&cfg.translator)?;
            let text = text.join(" ");

            let source = handler::pipeline::detect_source(
                translator.as_ref(),
                &text,
                cfg.translator.detect_prefix_chars,
            )
            .await;
            let slots = handler::pipeline::translate_targets(
                translator,
                Arc::from(text.as_str()),
                source.as_deref(),
                targets,
            )
            .await;
            println!(
                "{}",
                handler::compose::compose_reply(&flag, "you", source.as_deref(), &slots)
            );
        }
        Commands::Flags => {
            println!("{}", commands::help_text(&cfg.discord.command_prefix));
        }
    }

    Ok(())
}

/// Install the global subscriber: stderr always, plus a file when configured.
///
/// `RUST_LOG` wins over the configured level. The returned guard must live
/// until exit so buffered file output is flushed.
fn init_tracing(level: &str, log_file: &str) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = if log_file.trim().is_empty() {
        (None, None)
    } else {
        let path = Path::new(log_file);
        let Some(file_name) = path.file_name() else {
            anyhow::bail!("log_file '{log_file}' has no file name");
        };
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}
