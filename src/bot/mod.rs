//! Lifecycle of the bot: one-time setup on ready, event ingress and shutdown.

use crate::command::{CommandDefinition, CommandRegistry, Invocation};
use crate::dispatch::{self, worker, Dispatch, DispatchQueue};
use crate::error::Error;
use serenity::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub const OWNER_GREETING: &str = "Bot is online!";

/// Calls the bot makes on the chat platform outside of command replies.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn direct_message(&self, user: u64, content: &str) -> Result<(), Error>;

    /// Creates a remote command definition, globally when `guild` is `None`.
    async fn create_command(
        &self,
        definition: &CommandDefinition,
        guild: Option<u64>,
    ) -> Result<(), Error>;
}

#[derive(Debug, Clone, Default)]
pub struct BotSettings {
    pub owner: Option<u64>,
    pub queue_capacity: Option<usize>,
}

pub struct Bot {
    registry: CommandRegistry,
    queue: Arc<DispatchQueue<Dispatch>>,
    owner: Option<u64>,
    running: Arc<AtomicBool>,
    dirty: AtomicBool,
    initialized: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Bot {
    pub fn new(registry: CommandRegistry, settings: BotSettings) -> Self {
        Self {
            registry,
            queue: Arc::new(DispatchQueue::with_capacity(settings.queue_capacity)),
            owner: settings.owner,
            running: Arc::new(AtomicBool::new(true)),
            dirty: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            worker: Mutex::new(None),
        }
    }

    /// Event ingress for one incoming command.
    pub fn ingest(&self, invocation: Invocation) -> bool {
        dispatch::ingest(&self.registry, &self.queue, invocation)
    }

    /// Handles the gateway's ready signal. Only the first call does any
    /// work: greet the owner, publish the command definitions and start
    /// the worker.
    pub async fn on_ready(&self, platform: &dyn Platform) {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("ready fired again, already initialized");
            return;
        }

        if self.registry.is_empty() {
            warn!("no commands registered");
        }
        self.notify_owner(platform).await;
        self.register_commands(platform).await;
        if let Err(why) = self.start_worker() {
            error!("could not start command dispatcher: {}", why);
        }
    }

    async fn notify_owner(&self, platform: &dyn Platform) {
        let Some(owner) = self.owner else {
            return;
        };
        match platform.direct_message(owner, OWNER_GREETING).await {
            Ok(()) => info!(owner, "owner notified"),
            Err(why) => error!(owner, "could not notify owner: {}", why),
        }
    }

    async fn register_commands(&self, platform: &dyn Platform) {
        info!(commands = self.registry.len(), "publishing command definitions");
        for definition in self.registry.definitions() {
            info!(command = %definition.name, "command loaded: {}", definition.description);
            if definition.guilds.is_empty() {
                self.create_command(platform, &definition, None).await;
            } else {
                for guild in &definition.guilds {
                    self.create_command(platform, &definition, Some(*guild))
                        .await;
                }
            }
        }
    }

    async fn create_command(
        &self,
        platform: &dyn Platform,
        definition: &CommandDefinition,
        guild: Option<u64>,
    ) {
        if let Err(why) = platform.create_command(definition, guild).await {
            error!(command = %definition.name, ?guild, "could not create command: {}", why);
            self.set_dirty();
        }
    }

    fn start_worker(&self) -> Result<(), Error> {
        let mut slot = self.worker.lock()?;
        if slot.is_some() {
            return Ok(());
        }
        if !self.is_running() {
            warn!("not starting command dispatcher after shutdown");
            return Ok(());
        }
        *slot = Some(worker::spawn(
            Arc::clone(&self.queue),
            Arc::clone(&self.running),
        ));
        Ok(())
    }

    /// Stops the worker and waits for it. A command already running
    /// finishes first; queued commands are dropped.
    pub async fn shutdown(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            info!("shutting down command dispatcher");
        }
        self.queue.wake();

        let worker = match self.worker.lock() {
            Ok(mut worker) => worker.take(),
            Err(why) => {
                error!("worker handle unavailable: {}", why);
                None
            }
        };
        if let Some(worker) = worker {
            if let Err(why) = worker.await {
                error!("command dispatcher ended abnormally: {}", why);
            }
        }

        match self.pending() {
            Ok(0) => {}
            Ok(pending) => warn!(pending, "dropping queued commands"),
            Err(why) => error!("{}", why),
        }
        if self.is_dirty() {
            warn!("remote command definitions are out of sync");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Marks remote state as out of sync with the local registry.
    pub fn set_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub fn pending(&self) -> Result<usize, Error> {
        self.queue.len()
    }
}
