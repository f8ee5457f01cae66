use crate::{bot::BotSettings, error::Error};
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// Discord bot that answers slash and context-menu commands.
#[derive(Debug, Parser)]
#[command(name = "slashbot", version)]
pub struct Cli {
    /// `token=<TOKEN>`, `ownerid=<USER ID>`, `logfile=<PATH>`,
    /// `queuecapacity=<N>`, or the bot token on its own
    #[arg(value_name = "PARAM", value_parser = parse_param)]
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Value { key: String, value: String },
    Bare(String),
}

fn parse_param(raw: &str) -> Result<Param, String> {
    match raw.split_once('=') {
        Some((key, value)) => {
            let key = key.to_lowercase();
            if key.is_empty() {
                return Err(format!("`{}` has no key", raw));
            }
            Ok(Param::Value {
                key,
                value: value.to_string(),
            })
        }
        None => Ok(Param::Bare(raw.to_string())),
    }
}

/// Values that can also come from the environment.
#[derive(Debug, Default)]
pub struct Environment {
    pub token: Option<String>,
    pub owner: Option<String>,
}

impl Environment {
    /// Reads `DISCORD_TOKEN` and `OWNER_ID`, after loading `.env` if present.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self {
            token: std::env::var("DISCORD_TOKEN").ok(),
            owner: std::env::var("OWNER_ID").ok(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub owner: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub queue_capacity: Option<usize>,
}

impl Config {
    /// Command line first, environment second.
    pub fn resolve(cli: Cli, env: Environment) -> Result<Self, Error> {
        let mut token = None;
        let mut bare_token = None;
        let mut owner = None;
        let mut log_file = None;
        let mut queue_capacity = None;

        for param in cli.params {
            match param {
                Param::Value { key, value } => match key.as_str() {
                    "token" => token = Some(value),
                    "ownerid" => owner = Some(value),
                    "logfile" => log_file = Some(PathBuf::from(value)),
                    "queuecapacity" => queue_capacity = Some(parse_capacity(&value)?),
                    _ => warn!(param = %key, "ignoring unknown parameter"),
                },
                Param::Bare(value) => {
                    if bare_token.is_none() {
                        bare_token = Some(value);
                    } else {
                        warn!("ignoring extra positional argument");
                    }
                }
            }
        }

        let token = [token, bare_token, env.token]
            .into_iter()
            .flatten()
            .find(|token| !token.trim().is_empty())
            .ok_or(Error::MissingToken)?;
        let owner = parse_owner(owner.or(env.owner))?;

        Ok(Self {
            token,
            owner,
            log_file,
            queue_capacity,
        })
    }

    pub fn bot_settings(&self) -> BotSettings {
        BotSettings {
            owner: self.owner,
            queue_capacity: self.queue_capacity,
        }
    }
}

fn parse_owner(raw: Option<String>) -> Result<Option<u64>, Error> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => id
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidOwner(id.to_string())),
    }
}

fn parse_capacity(raw: &str) -> Result<usize, Error> {
    match raw.trim().parse() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(Error::InvalidCapacity(raw.to_string())),
    }
}
