use std::fmt::{Display, Formatter};

/// Where the controller is in a submission.
///
/// `Idle → Validating → Submitting → (Succeeded | Failed) → Idle`. A
/// rejected candidate goes straight from `Validating` back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Validating => write!(f, "validating"),
            Phase::Submitting => write!(f, "submitting"),
            Phase::Succeeded => write!(f, "succeeded"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

pub const SHORTENED_MESSAGE: &str = "URL shortened successfully";
pub const SHORTEN_FAILED_MESSAGE: &str = "Failed to shorten URL";
pub const CLEARED_MESSAGE: &str = "Cleared shortened URLs";

/// A transient message for the user (a toast, in a graphical front end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }
}

/// One line of the "previously shortened" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub original_url: String,
    pub short_url: String,
    pub display_url: String,
    pub age: String,
}

/// Snapshot of everything a front end renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub phase: Phase,
    pub input: String,
    /// Token of the most recent successful shortening.
    pub short_url: Option<String>,
    /// `short_url` joined with the base URL.
    pub display_url: Option<String>,
    pub validation_error: Option<String>,
    pub notification: Option<Notification>,
    pub history: Vec<HistoryRow>,
}

impl UiState {
    /// Submission is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle
    }
}
