use clap::Parser;
use serenity::{prelude::GatewayIntents, Client};
use slashbot::{
    bot::Bot,
    command::CommandRegistry,
    config::{Cli, Config, Environment},
    error::Error,
    handler::Handler,
    logbook::{self, LogBook},
};
use std::{process::ExitCode, sync::Arc};
use tracing::{error, info};

const EXIT_NO_TOKEN: u8 = 1;
const EXIT_STARTUP_FAILED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let book = LogBook::default();
    if let Err(why) = logbook::init(book.clone()) {
        eprintln!("{}", why);
    }

    let config = match Config::resolve(cli, Environment::load()) {
        Ok(config) => config,
        Err(why) => {
            error!(fatal = true, "{}", why);
            return match why {
                Error::MissingToken => ExitCode::from(EXIT_NO_TOKEN),
                _ => ExitCode::from(EXIT_STARTUP_FAILED),
            };
        }
    };

    let code = match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!(fatal = true, "client error: {}", why);
            ExitCode::from(EXIT_STARTUP_FAILED)
        }
    };

    if let Some(path) = &config.log_file {
        match book.save(path) {
            Ok(()) => info!(path = %path.display(), "log saved"),
            Err(why) => error!(path = %path.display(), "could not save log: {}", why),
        }
    }
    code
}

async fn run(config: &Config) -> Result<(), Error> {
    let bot = Arc::new(Bot::new(CommandRegistry::builtin(), config.bot_settings()));
    let mut client = Client::builder(&config.token, GatewayIntents::non_privileged())
        .event_handler(Handler::new(Arc::clone(&bot)))
        .await?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                shard_manager.lock().await.shutdown_all().await;
            }
            Err(why) => error!("cannot listen for ctrl-c: {}", why),
        }
    });

    let result = client.start().await;
    bot.shutdown().await;
    result?;
    Ok(())
}
