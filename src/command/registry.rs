use super::{AcknowledgeCommand, Command, CommandDefinition, EchoCommand, PingCommand};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Produces a fresh handler for every invocation.
pub type CommandFactory = fn() -> Box<dyn Command>;

/// Name → factory table, filled once before the client connects and
/// read-only afterwards.
#[derive(Default)]
pub struct CommandRegistry {
    factories: BTreeMap<String, CommandFactory>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every command the bot ships with.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(PingCommand::NAME, factory::<PingCommand>)
            .register(EchoCommand::NAME, factory::<EchoCommand>)
            .register(AcknowledgeCommand::NAME, factory::<AcknowledgeCommand>);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: CommandFactory) -> &mut Self {
        let name = name.into();
        debug!(command = %name, "registering command");
        if self.factories.insert(name.clone(), factory).is_some() {
            warn!(command = %name, "command registered twice, keeping the last one");
        }
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Box<dyn Command>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// One definition per registered command, instantiated through its factory.
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        self.factories
            .values()
            .map(|factory| CommandDefinition::of(factory().as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

fn factory<C: Command + Default + 'static>() -> Box<dyn Command> {
    Box::new(C::default())
}
