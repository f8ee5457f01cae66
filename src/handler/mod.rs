use crate::{
    bot::{Bot, Platform},
    command::{
        CommandDefinition, CommandKind, Invocation, OptionKind, Respond, TargetMessage,
    },
    error::Error,
};
use serenity::{
    async_trait,
    builder::CreateApplicationCommand,
    http::Http,
    model::{
        application::{
            command::{Command, CommandOptionType, CommandType},
            interaction::{
                application_command::{ApplicationCommandInteraction, ResolvedTarget},
                Interaction, InteractionResponseType,
            },
        },
        channel::ReactionType,
        gateway::Ready,
        id::{ChannelId, GuildId, MessageId, UserId},
    },
    prelude::*,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Gateway event handler feeding the bot.
pub struct Handler {
    bot: Arc<Bot>,
}

impl Handler {
    pub fn new(bot: Arc<Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                let invocation = invocation_from(ctx.http.clone(), command);
                self.bot.ingest(invocation);
            }
            _ => debug!("ignoring non-command interaction"),
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        let platform = DiscordPlatform { http: ctx.http };
        self.bot.on_ready(&platform).await;
    }
}

fn invocation_from(http: Arc<Http>, command: ApplicationCommandInteraction) -> Invocation {
    let kind = match command.data.kind {
        CommandType::Message => CommandKind::Message,
        _ => CommandKind::ChatInput,
    };
    let name = command.data.name.clone();
    let reply = Arc::new(Reply::new(http, command.clone()));
    let mut invocation = Invocation::new(name, kind, reply);
    for option in &command.data.options {
        if let Some(value) = &option.value {
            invocation = invocation.with_argument(option.name.clone(), render(value));
        }
    }
    if let Some(ResolvedTarget::Message(message)) = command.data.target() {
        invocation = invocation.with_target(TargetMessage {
            channel: message.channel_id.0,
            id: message.id.0,
            content: message.content,
        });
    }
    invocation
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Answers one interaction.
struct Reply {
    http: Arc<Http>,
    command: ApplicationCommandInteraction,
}

impl Reply {
    fn new(http: Arc<Http>, command: ApplicationCommandInteraction) -> Self {
        Self { http, command }
    }
}

#[async_trait]
impl Respond for Reply {
    async fn reply(&self, content: String) -> Result<(), Error> {
        self.command
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(content))
            })
            .await?;
        Ok(())
    }

    async fn react(&self, channel: u64, message: u64, emoji: String) -> Result<(), Error> {
        ChannelId(channel)
            .create_reaction(&self.http, MessageId(message), ReactionType::Unicode(emoji))
            .await?;
        Ok(())
    }
}

struct DiscordPlatform {
    http: Arc<Http>,
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn direct_message(&self, user: u64, content: &str) -> Result<(), Error> {
        let channel = UserId(user).create_dm_channel(self.http.as_ref()).await?;
        channel.id.say(&self.http, content).await?;
        Ok(())
    }

    async fn create_command(
        &self,
        definition: &CommandDefinition,
        guild: Option<u64>,
    ) -> Result<(), Error> {
        match guild {
            None => {
                Command::create_global_application_command(&self.http, |command| {
                    build(command, definition)
                })
                .await?;
            }
            Some(guild) => {
                GuildId(guild)
                    .create_application_command(&self.http, |command| build(command, definition))
                    .await?;
            }
        }
        Ok(())
    }
}

fn build<'a>(
    command: &'a mut CreateApplicationCommand,
    definition: &CommandDefinition,
) -> &'a mut CreateApplicationCommand {
    command.name(&definition.name).kind(command_type(definition.kind));
    // context-menu commands must not carry a description
    if definition.kind == CommandKind::ChatInput {
        command.description(&definition.description);
    }
    for option in &definition.options {
        command.create_option(|builder| {
            builder
                .name(option.name)
                .description(option.description)
                .kind(option_type(option.kind))
                .required(option.required)
        });
    }
    command
}

fn command_type(kind: CommandKind) -> CommandType {
    match kind {
        CommandKind::ChatInput => CommandType::ChatInput,
        CommandKind::Message => CommandType::Message,
    }
}

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::User => CommandOptionType::User,
        OptionKind::Channel => CommandOptionType::Channel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{AcknowledgeCommand, EchoCommand};
    use std::collections::HashMap;

    #[test]
    fn option_values_render_without_quotes() {
        assert_eq!(render(&Value::String("hi".to_string())), "hi");
        assert_eq!(render(&Value::from(3)), "3");
        assert_eq!(render(&Value::Bool(true)), "true");
    }

    #[test]
    fn chat_input_definition_keeps_description_and_options() {
        let definition = CommandDefinition::of(&EchoCommand);
        let mut command = CreateApplicationCommand(HashMap::new());
        build(&mut command, &definition);
        assert_eq!(command.0.get("name"), Some(&Value::from("echo")));
        assert_eq!(
            command.0.get("description"),
            Some(&Value::from(definition.description.as_str()))
        );
        let options = command.0.get("options").and_then(Value::as_array).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].get("name"), Some(&Value::from("text")));
        assert_eq!(options[0].get("required"), Some(&Value::Bool(true)));
    }

    #[test]
    fn message_definition_has_no_description() {
        let definition = CommandDefinition::of(&AcknowledgeCommand);
        let mut command = CreateApplicationCommand(HashMap::new());
        build(&mut command, &definition);
        assert_eq!(command.0.get("name"), Some(&Value::from("Acknowledge")));
        assert!(command.0.get("description").is_none());
    }
}
