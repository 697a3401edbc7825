//! Logging capability handed to each stage
//!
//! Stages never reach for a global logger directly. They log through an
//! [`EventSink`], which defaults to [`LogSink`] (the `log` facade) and can be
//! swapped for a [`MemorySink`] to observe what a stage reported.

use log::Level;
use std::sync::{Arc, Mutex, PoisonError};

/// Anything that accepts a level and a message
pub trait EventSink {
    fn log(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

/// The default sink shared by stages that were not given one
pub fn default_sink() -> Arc<dyn EventSink> {
    Arc::new(LogSink)
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl EventSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}
