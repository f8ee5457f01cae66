//! Discord bot that answers slash and context-menu commands.
//!
//! Gateway callbacks never run commands themselves. They resolve the
//! handler and queue the invocation; a single worker task drains the queue
//! in arrival order, so handlers never run concurrently.
//!
//! ```text
//! gateway ──> handler::Handler ──> dispatch::ingest ──> DispatchQueue
//!                                                           │
//!                        reply <── Command::execute <── worker
//! ```

pub mod bot;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod logbook;
#[cfg(test)]
mod testing;
