use std::collections::VecDeque;

const MAX_ENTRIES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
}

/// A line in the activity panel.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// `HH:MM:SS` local time.
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Rolling log shown under the queue preview.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    fn push(&mut self, level: LogLevel, message: String) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            level,
            message,
        });
    }

    pub fn log(&mut self, message: String) {
        self.push(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: String) {
        self.push(LogLevel::Success, message);
    }

    pub fn log_warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.push(LogLevel::Warn, message);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }
}
