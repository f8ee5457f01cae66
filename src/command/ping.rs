use super::{Command, Invocation};
use crate::error::Error;
use serenity::async_trait;

#[derive(Debug, Default)]
pub struct PingCommand;

impl PingCommand {
    pub const NAME: &'static str = "ping";
    pub const DESCRIPTION: &'static str = "Check connection to the bot.";
}

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error> {
        invocation.reply("Pong!").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Recorder;

    #[tokio::test]
    async fn replies_pong() {
        let recorder = Recorder::default();
        PingCommand
            .execute(&recorder.invocation("ping"))
            .await
            .unwrap();
        assert_eq!(recorder.replies(), vec!["Pong!".to_string()]);
    }
}
