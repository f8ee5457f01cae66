//! Hand-off from the gateway callbacks to the single command worker.

mod queue;
pub mod worker;

pub use queue::DispatchQueue;

use crate::command::{Command, CommandRegistry, Invocation};
use tracing::{debug, warn};

/// A queued invocation paired with the handler that will answer it.
pub struct Dispatch {
    pub invocation: Invocation,
    pub command: Box<dyn Command>,
}

/// Resolves the invocation's handler and queues the pair.
///
/// Never waits on the worker. Unknown commands and rejected pushes are
/// logged and dropped without replying. Returns whether the invocation was
/// queued.
pub fn ingest(
    registry: &CommandRegistry,
    queue: &DispatchQueue<Dispatch>,
    invocation: Invocation,
) -> bool {
    let Some(command) = registry.lookup(invocation.name()) else {
        warn!(command = invocation.name(), "command was not found");
        return false;
    };

    let name = invocation.name().to_string();
    let arguments = invocation.arguments().len();
    match queue.push(Dispatch {
        invocation,
        command,
    }) {
        Ok(()) => {
            debug!(command = %name, arguments, "command queued");
            true
        }
        Err(why) => {
            warn!(command = %name, "dropping command: {}", why);
            false
        }
    }
}
