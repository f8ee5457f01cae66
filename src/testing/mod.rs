//! Stand-ins for the Discord side of the bot.

use crate::bot::Platform;
use crate::command::{
    Command, CommandDefinition, CommandKind, CommandRegistry, Invocation, Respond,
};
use crate::error::Error;
use serenity::async_trait;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub const SLOW_COMMAND_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Reply(String),
    React {
        channel: u64,
        message: u64,
        emoji: String,
    },
}

/// Responder that keeps everything sent through it.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn invocation(&self, name: &str) -> Invocation {
        self.invocation_of_kind(name, CommandKind::ChatInput)
    }

    pub fn invocation_of_kind(&self, name: &str, kind: CommandKind) -> Invocation {
        Invocation::new(name, kind, Arc::new(self.clone()))
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Reply(content) => Some(content),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Respond for Recorder {
    async fn reply(&self, content: String) -> Result<(), Error> {
        self.events.lock().unwrap().push(Recorded::Reply(content));
        Ok(())
    }

    async fn react(&self, channel: u64, message: u64, emoji: String) -> Result<(), Error> {
        self.events.lock().unwrap().push(Recorded::React {
            channel,
            message,
            emoji,
        });
        Ok(())
    }
}

/// Platform that records calls instead of talking to Discord.
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub direct_messages: Mutex<Vec<(u64, String)>>,
    pub created: Mutex<Vec<(String, Option<u64>)>>,
    /// Command names whose creation fails.
    pub rejected: Vec<String>,
}

#[async_trait]
impl Platform for FakePlatform {
    async fn direct_message(&self, user: u64, content: &str) -> Result<(), Error> {
        self.direct_messages
            .lock()
            .unwrap()
            .push((user, content.to_string()));
        Ok(())
    }

    async fn create_command(
        &self,
        definition: &CommandDefinition,
        guild: Option<u64>,
    ) -> Result<(), Error> {
        if self.rejected.contains(&definition.name) {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "rejected by platform",
            )));
        }
        self.created
            .lock()
            .unwrap()
            .push((definition.name.clone(), guild));
        Ok(())
    }
}

/// Replies with the name it was invoked under.
struct NameCommand;

#[async_trait]
impl Command for NameCommand {
    fn name(&self) -> &'static str {
        "name"
    }

    fn description(&self) -> &'static str {
        "Reply with the invoked name."
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error> {
        invocation.reply(invocation.name()).await
    }
}

struct FailingCommand;

#[async_trait]
impl Command for FailingCommand {
    fn name(&self) -> &'static str {
        "fail"
    }

    fn description(&self) -> &'static str {
        "Always fails."
    }

    async fn execute(&self, _invocation: &Invocation) -> Result<(), Error> {
        Err(Error::MissingArgument("anything"))
    }
}

struct PanickingCommand;

#[async_trait]
impl Command for PanickingCommand {
    fn name(&self) -> &'static str {
        "panic"
    }

    fn description(&self) -> &'static str {
        "Always panics."
    }

    async fn execute(&self, _invocation: &Invocation) -> Result<(), Error> {
        panic!("handler blew up")
    }
}

/// Sleeps for a while before replying "slow".
struct SlowCommand;

#[async_trait]
impl Command for SlowCommand {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn description(&self) -> &'static str {
        "Takes its time."
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error> {
        tokio::time::sleep(SLOW_COMMAND_DELAY).await;
        invocation.reply("slow").await
    }
}

/// Guild-only command, for registration tests.
struct GuildCommand;

#[async_trait]
impl Command for GuildCommand {
    fn name(&self) -> &'static str {
        "guild"
    }

    fn description(&self) -> &'static str {
        "Only in two guilds."
    }

    fn exclusive_guilds(&self) -> Vec<u64> {
        vec![111, 222]
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error> {
        invocation.reply("guild").await
    }
}

/// Builtin commands plus `A`, `B`, `C` (reply with their own name),
/// `fail`, `panic`, `slow` and `guild`.
pub fn test_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::builtin();
    registry
        .register("A", || Box::new(NameCommand))
        .register("B", || Box::new(NameCommand))
        .register("C", || Box::new(NameCommand))
        .register("fail", || Box::new(FailingCommand))
        .register("panic", || Box::new(PanickingCommand))
        .register("slow", || Box::new(SlowCommand))
        .register("guild", || Box::new(GuildCommand));
    registry
}

/// Polls `condition` until it holds, failing the test after a second.
pub async fn eventually(condition: impl Fn() -> bool) {
    let polled = tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(polled.is_ok(), "condition not reached in time");
}
