use super::{Command, Invocation, OptionKind, OptionSpec};
use crate::error::Error;
use serenity::async_trait;

const TEXT: &str = "text";

/// Repeats the `text` option back to the caller.
#[derive(Debug, Default)]
pub struct EchoCommand;

impl EchoCommand {
    pub const NAME: &'static str = "echo";
}

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Repeat a line of text."
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec {
            name: TEXT,
            description: "Text to repeat",
            kind: OptionKind::String,
            required: true,
        }]
    }

    async fn execute(&self, invocation: &Invocation) -> Result<(), Error> {
        let text = invocation
            .argument(TEXT)
            .ok_or(Error::MissingArgument(TEXT))?;
        invocation.reply(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Recorder;

    #[tokio::test]
    async fn repeats_text() {
        let recorder = Recorder::default();
        let invocation = recorder.invocation("echo").with_argument("text", "hello there");
        EchoCommand.execute(&invocation).await.unwrap();
        assert_eq!(recorder.replies(), vec!["hello there".to_string()]);
    }

    #[tokio::test]
    async fn missing_text_is_an_error() {
        let recorder = Recorder::default();
        let result = EchoCommand.execute(&recorder.invocation("echo")).await;
        assert!(matches!(result, Err(Error::MissingArgument("text"))));
        assert!(recorder.replies().is_empty());
    }
}
