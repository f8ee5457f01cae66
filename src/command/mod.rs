//! Command handlers and the invocations they answer.
//!
//! A handler describes itself (name, description, kind, options, guilds)
//! and answers one [`Invocation`] at a time through [`Command::execute`].
//! Replies go back through the [`Respond`] capability attached to the
//! invocation, so handlers never touch the Discord client directly.

mod acknowledge;
mod echo;
mod ping;
mod registry;

pub use acknowledge::AcknowledgeCommand;
pub use echo::EchoCommand;
pub use ping::PingCommand;
pub use registry::{CommandFactory, CommandRegistry};

use crate::error::Error;
use serenity::async_trait;
use std::{fmt, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Slash command typed into the chat box.
    ChatInput,
    /// Entry in a message's "Apps" context menu.
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn kind(&self) -> CommandKind {
        CommandKind::ChatInput
    }

    fn options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    /// Guilds the command is limited to. Empty means global.
    fn exclusive_guilds(&self) -> Vec<u64> {
        Vec::new()
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error>;
}

/// Everything the remote side needs to create a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
    pub options: Vec<OptionSpec>,
    pub guilds: Vec<u64>,
}

impl CommandDefinition {
    pub fn of(command: &dyn Command) -> Self {
        Self {
            name: command.name().to_string(),
            description: command.description().to_string(),
            kind: command.kind(),
            options: command.options(),
            guilds: command.exclusive_guilds(),
        }
    }
}

/// Way back to whoever triggered an invocation.
#[async_trait]
pub trait Respond: Send + Sync {
    async fn reply(&self, content: String) -> Result<(), Error>;

    async fn react(&self, channel: u64, message: u64, emoji: String) -> Result<(), Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub value: String,
}

/// Message a context-menu command was used on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMessage {
    pub channel: u64,
    pub id: u64,
    pub content: String,
}

/// One incoming command invocation.
pub struct Invocation {
    name: String,
    kind: CommandKind,
    arguments: Vec<Argument>,
    target: Option<TargetMessage>,
    responder: Arc<dyn Respond>,
}

impl Invocation {
    pub fn new(name: impl Into<String>, kind: CommandKind, responder: Arc<dyn Respond>) -> Self {
        Self {
            name: name.into(),
            kind,
            arguments: Vec::new(),
            target: None,
            responder,
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push(Argument {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_target(mut self, target: TargetMessage) -> Self {
        self.target = Some(target);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| argument.value.as_str())
    }

    pub fn target(&self) -> Option<&TargetMessage> {
        self.target.as_ref()
    }

    pub async fn reply(&self, content: impl Into<String>) -> Result<(), Error> {
        self.responder.reply(content.into()).await
    }

    pub async fn react(
        &self,
        target: &TargetMessage,
        emoji: impl Into<String>,
    ) -> Result<(), Error> {
        self.responder
            .react(target.channel, target.id, emoji.into())
            .await
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("arguments", &self.arguments)
            .field("target", &self.target)
            .finish()
    }
}
