use super::{Command, CommandKind, Invocation};
use crate::error::Error;
use serenity::async_trait;

const CHECK_MARK: &str = "✅";

/// Context-menu action: marks a message as seen.
#[derive(Debug, Default)]
pub struct AcknowledgeCommand;

impl AcknowledgeCommand {
    pub const NAME: &'static str = "Acknowledge";
}

#[async_trait]
impl Command for AcknowledgeCommand {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Mark a message as acknowledged."
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Message
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error> {
        let target = invocation
            .target()
            .ok_or_else(|| Error::MissingTarget(invocation.name().to_string()))?;
        invocation.react(target, CHECK_MARK).await?;
        invocation.reply("Acknowledged.").await
    }
}
