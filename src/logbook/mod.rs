//! In-memory log book.
//!
//! Every `tracing` event that passes the global filter is appended to a
//! shared list so the whole session can be written out to a file when the
//! process exits. Fatal entries are plain `error!` events carrying
//! `fatal = true`.

use crate::error::Error;
use chrono::{DateTime, Utc};
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{fmt as tracing_fmt, layer::Context, prelude::*, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,serenity=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        if level == Level::ERROR {
            LogLevel::Error
        } else if level == Level::WARN {
            LogLevel::Warn
        } else if level == Level::INFO {
            LogLevel::Info
        } else {
            LogLevel::Debug
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]\t{}\t{}",
            self.level.as_str(),
            self.at.to_rfc3339(),
            self.message
        )
    }
}

/// Append-only record of every logged event, shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct LogBook {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogBook {
    pub fn entries(&self) -> Result<Vec<LogEntry>, Error> {
        Ok(self.entries.lock()?.clone())
    }

    /// Writes every entry, oldest first, one per line.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let entries = self.entries()?;
        let mut file = BufWriter::new(File::create(path)?);
        for entry in &entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()?;
        Ok(())
    }

    fn append(&self, entry: LogEntry) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push(entry);
    }
}

impl<S: Subscriber> Layer<S> for LogBook {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);
        let level = if visitor.fatal {
            LogLevel::Fatal
        } else {
            LogLevel::from(*event.metadata().level())
        };
        self.append(LogEntry {
            at: Utc::now(),
            level,
            message: visitor.finish(),
        });
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: String,
    fields: Vec<String>,
    fatal: bool,
}

impl EntryVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for EntryVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "fatal" {
            self.fatal = value;
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// Installs the process-wide subscriber: env filter, stderr formatter and
/// the given log book.
pub fn init(book: LogBook) -> Result<(), Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().with_writer(std::io::stderr))
        .with(book)
        .try_init()?;
    Ok(())
}
