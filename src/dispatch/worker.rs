//! The command worker: drains the queue and runs one handler at a time.

use super::{Dispatch, DispatchQueue};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Starts the worker task. It keeps going until `running` is cleared and
/// [`DispatchQueue::wake`] is called; entries still queued at that point
/// are dropped.
pub fn spawn(queue: Arc<DispatchQueue<Dispatch>>, running: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(run(queue, running))
}

async fn run(queue: Arc<DispatchQueue<Dispatch>>, running: Arc<AtomicBool>) {
    info!("command dispatcher started");
    while running.load(Ordering::Acquire) {
        match queue.pop() {
            Ok(Some(dispatch)) => execute(dispatch).await,
            Ok(None) => queue.wait().await,
            Err(why) => {
                error!("dispatch queue unusable, stopping: {}", why);
                break;
            }
        }
    }
    info!("command dispatcher stopped");
}

/// Runs a single handler to completion. Errors and panics end here.
async fn execute(dispatch: Dispatch) {
    let name = dispatch.invocation.name().to_string();
    debug!(command = %name, kind = ?dispatch.invocation.kind(), "running command");

    let outcome = tokio::spawn(async move {
        let Dispatch {
            invocation,
            command,
        } = dispatch;
        command.execute(&invocation).await
    })
    .await;

    match outcome {
        Ok(Ok(())) => debug!(command = %name, "command finished"),
        Ok(Err(why)) => error!(command = %name, "command failed: {}", why),
        Err(why) => error!(command = %name, "command panicked: {}", why),
    }
}
