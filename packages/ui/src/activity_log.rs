//! In-app record of what the user asked the gateway to do and how it went.

use dioxus::prelude::*;
use store::BackendError;

/// Oldest entries are dropped past this many.
pub const MAX_ENTRIES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Success,
    Warning,
    Error,
}

/// Category of a failed call, as shown in the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Session,
    NotFound,
    Rejected(u16),
    Server(u16),
    Decode,
}

impl From<&BackendError> for FailureKind {
    fn from(error: &BackendError) -> Self {
        match error {
            BackendError::Network(_) => FailureKind::Network,
            BackendError::Unauthorized => FailureKind::Session,
            BackendError::NotFound => FailureKind::NotFound,
            BackendError::Rejected { status, .. } => FailureKind::Rejected(*status),
            BackendError::Server { status, .. } => FailureKind::Server(*status),
            BackendError::Decode(_) => FailureKind::Decode,
        }
    }
}

impl FailureKind {
    pub fn label(&self) -> String {
        match self {
            FailureKind::Network => "réseau".to_string(),
            FailureKind::Session => "session expirée".to_string(),
            FailureKind::NotFound => "introuvable".to_string(),
            FailureKind::Rejected(status) => format!("refusé ({status})"),
            FailureKind::Server(status) => format!("erreur serveur ({status})"),
            FailureKind::Decode => "réponse illisible".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    /// What was attempted, e.g. "Ajout du patient".
    pub action: String,
    pub failure: Option<FailureKind>,
    /// Server message or transport error text.
    pub detail: Option<String>,
}

impl LogEntry {
    fn new(level: LogLevel, action: &str) -> Self {
        Self {
            timestamp: current_time(),
            level,
            action: action.to_string(),
            failure: None,
            detail: None,
        }
    }

    fn failed(action: &str, error: &BackendError) -> Self {
        let kind = FailureKind::from(error);
        let level = if kind == FailureKind::Session {
            LogLevel::Warning
        } else {
            LogLevel::Error
        };
        let detail = match error {
            BackendError::Network(msg) | BackendError::Decode(msg) => Some(msg.clone()),
            BackendError::Rejected { message, .. } | BackendError::Server { message, .. } => {
                Some(message.clone()).filter(|m| !m.trim().is_empty())
            }
            BackendError::Unauthorized | BackendError::NotFound => None,
        };
        Self {
            failure: Some(kind),
            detail,
            ..Self::new(level, action)
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    /// Append, keeping at most [`MAX_ENTRIES`].
    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.failure.is_some()).count()
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, action: &str) {
    log.write().record(LogEntry::new(level, action));
}

/// Record a failed backend call. A 401 is a warning, anything else an error.
pub fn log_failure(log: &mut Signal<ActivityLog>, action: &str, error: &BackendError) {
    log.write().record(LogEntry::failed(action, error));
}

fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
