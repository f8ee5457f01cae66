use crate::error::Error;
use std::{collections::VecDeque, sync::Mutex};
use tokio::sync::Notify;

/// FIFO hand-off between the gateway callbacks and the worker.
///
/// The lock is only held for the push or pop itself. Every push leaves a
/// wake-up permit so a worker parked in [`DispatchQueue::wait`] never misses
/// an entry that arrived between its last pop and the wait.
#[derive(Debug)]
pub struct DispatchQueue<T> {
    entries: Mutex<VecDeque<T>>,
    capacity: Option<usize>,
    wakeup: Notify,
}

impl<T> DispatchQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// `None` leaves the queue unbounded. With a bound, pushes onto a full
    /// queue are rejected.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity,
            wakeup: Notify::new(),
        }
    }

    pub fn push(&self, entry: T) -> Result<(), Error> {
        {
            let mut entries = self.entries.lock()?;
            if let Some(capacity) = self.capacity {
                if entries.len() >= capacity {
                    return Err(Error::QueueFull(entries.len()));
                }
            }
            entries.push_back(entry);
        }
        self.wakeup.notify_one();
        Ok(())
    }

    pub fn pop(&self) -> Result<Option<T>, Error> {
        Ok(self.entries.lock()?.pop_front())
    }

    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.entries.lock()?.len())
    }

    /// Parks until the next push or [`DispatchQueue::wake`].
    pub async fn wait(&self) {
        self.wakeup.notified().await;
    }

    pub fn wake(&self) {
        self.wakeup.notify_one();
    }
}

impl<T> Default for DispatchQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
