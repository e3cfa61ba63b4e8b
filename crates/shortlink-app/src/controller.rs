use crate::error::AppError;
use crate::ticker::{AgeTicker, TickerHandle};
use crate::view::{
    HistoryRow, Notification, Phase, UiState, CLEARED_MESSAGE, SHORTENED_MESSAGE,
    SHORTEN_FAILED_MESSAGE,
};
use parking_lot::Mutex;
use shortlink_client::{Outcome, RequestFailure, ShortenClient};
use shortlink_core::{check_url, Clock, ShortenedRecord, SystemClock, ValidationError};
use shortlink_history::{HistoryStorage, HistoryStore, InsertOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// What happened to one call to [`ShortenerController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    /// The service returned a short URL. `history` tells whether it was
    /// added to the history or already present.
    Shortened {
        short_url: String,
        display_url: String,
        history: InsertOutcome,
    },
    /// The input is not a valid URL; no request was made.
    Rejected(ValidationError),
    /// The request failed; history and the displayed URL are unchanged.
    Failed(RequestFailure),
    /// Another submission is still in flight; this one was ignored.
    Busy,
    /// The controller was shut down before the response arrived.
    Discarded,
}

impl SubmitReport {
    pub fn error(&self) -> Option<AppError> {
        match self {
            SubmitReport::Rejected(e) => Some(AppError::Validation(e.clone())),
            SubmitReport::Failed(e) => Some(AppError::Request(e.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Screen {
    phase: Phase,
    input: String,
    short_url: Option<String>,
    validation_error: Option<String>,
    notification: Option<Notification>,
}

/// Orchestrates validation, the remote call and the history.
///
/// At most one submission is in flight at a time; a second `submit` while
/// one is pending is a no-op. The history store is only locked after the
/// network call returns, so it is never held across a remote request.
pub struct ShortenerController<Cl, S, C = SystemClock> {
    client: Cl,
    store: tokio::sync::Mutex<HistoryStore<S, C>>,
    base_url: String,
    screen: Mutex<Screen>,
    in_flight: AtomicBool,
    torn_down: AtomicBool,
    ticker: Mutex<Option<TickerHandle>>,
}

/// Releases the in-flight flag and returns the screen to `Idle`, even if the
/// submit future is dropped part way through.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    screen: &'a Mutex<Screen>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut screen = self.screen.lock();
        if screen.phase != Phase::Idle {
            trace!(from = %screen.phase, "submission ended, back to idle");
            screen.phase = Phase::Idle;
        }
        self.flag.store(false, Ordering::Release);
    }
}

impl<Cl, S, C> ShortenerController<Cl, S, C>
where
    Cl: ShortenClient,
    S: HistoryStorage,
    C: Clock + 'static,
{
    /// Creates a controller over an already loaded store.
    ///
    /// `base_url` is used to build display links, and should be the same
    /// base the client sends requests to.
    pub fn new(client: Cl, store: HistoryStore<S, C>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            store: tokio::sync::Mutex::new(store),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            screen: Mutex::new(Screen::default()),
            in_flight: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
            ticker: Mutex::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn phase(&self) -> Phase {
        self.screen.lock().phase
    }

    /// Replaces the candidate held in the input field.
    pub fn set_input(&self, input: impl Into<String>) {
        self.screen.lock().input = input.into();
    }

    /// Sets the input and submits it.
    pub async fn submit_url(&self, input: impl Into<String>) -> SubmitReport {
        if self.in_flight.load(Ordering::Acquire) {
            debug!("submission already in flight, ignoring");
            return SubmitReport::Busy;
        }
        self.set_input(input);
        self.submit().await
    }

    /// Submits the current input.
    pub async fn submit(&self) -> SubmitReport {
        if self.is_shut_down() {
            return SubmitReport::Discarded;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submission already in flight, ignoring");
            return SubmitReport::Busy;
        }
        let _in_flight = InFlight {
            flag: &self.in_flight,
            screen: &self.screen,
        };

        let input = {
            let mut screen = self.screen.lock();
            screen.validation_error = None;
            screen.phase = Phase::Validating;
            screen.input.clone()
        };
        trace!(input = %input, "validating");

        if let Err(e) = check_url(&input) {
            debug!(input = %input, error = %e, "rejected invalid url");
            let mut screen = self.screen.lock();
            screen.validation_error = Some(e.user_message().to_string());
            screen.phase = Phase::Idle;
            return SubmitReport::Rejected(e);
        }

        self.transition(Phase::Submitting);
        let outcome = self.client.shorten(&input).await;

        if self.is_shut_down() {
            debug!(input = %input, "controller shut down, discarding response");
            return SubmitReport::Discarded;
        }

        match outcome {
            Outcome::Shortened { short_url, .. } => {
                let display_url = format!("{}/{}", self.base_url, short_url);

                // the store only adopts the record once it is written, so a
                // cancelled insert leaves both history and screen untouched
                let history = {
                    let mut store = self.store.lock().await;
                    let record = ShortenedRecord::new(&input, &short_url, store.clock().now());
                    store.insert(record).await
                };
                self.transition(Phase::Succeeded);

                {
                    let mut screen = self.screen.lock();
                    screen.short_url = Some(short_url.clone());
                    screen.notification =
                        Some(Notification::Success(SHORTENED_MESSAGE.to_string()));
                    screen.phase = Phase::Idle;
                }
                info!(url = %input, display_url = %display_url, "url shortened");

                SubmitReport::Shortened {
                    short_url,
                    display_url,
                    history,
                }
            }
            Outcome::Failed { reason } => {
                self.transition(Phase::Failed);
                warn!(url = %input, error = %reason, "failed to shorten url");
                {
                    let mut screen = self.screen.lock();
                    screen.notification =
                        Some(Notification::Error(SHORTEN_FAILED_MESSAGE.to_string()));
                    screen.phase = Phase::Idle;
                }
                SubmitReport::Failed(reason)
            }
        }
    }

    /// Empties the history, including its durable copy.
    pub async fn clear_history(&self) {
        self.store.lock().await.clear().await;
        self.screen.lock().notification = Some(Notification::Success(CLEARED_MESSAGE.to_string()));
        info!("history cleared");
    }

    /// Snapshot of the current screen, with age labels computed now.
    pub async fn view(&self) -> UiState {
        let history = {
            let store = self.store.lock().await;
            let now = store.clock().now();
            store
                .records()
                .iter()
                .map(|record| HistoryRow {
                    original_url: record.original_url.clone(),
                    short_url: record.short_url.clone(),
                    display_url: record.display_url(&self.base_url),
                    age: record.age_label(now),
                })
                .collect()
        };

        let screen = self.screen.lock();
        UiState {
            phase: screen.phase,
            input: screen.input.clone(),
            short_url: screen.short_url.clone(),
            display_url: screen
                .short_url
                .as_ref()
                .map(|s| format!("{}/{}", self.base_url, s)),
            validation_error: screen.validation_error.clone(),
            notification: screen.notification.clone(),
            history,
        }
    }

    /// Starts re-rendering every `period`, handing each fresh snapshot to
    /// `render`. The ticker is stopped by [`shutdown`](Self::shutdown).
    ///
    /// Any ticker started earlier is replaced and stopped.
    pub fn start_age_refresh<F>(self: &Arc<Self>, period: Duration, render: F)
    where
        F: Fn(UiState) + Send + Sync + 'static,
    {
        let controller = Arc::downgrade(self);
        let render = Arc::new(render);
        let handle = AgeTicker::spawn(period, move || {
            let controller = controller.clone();
            let render = Arc::clone(&render);
            async move {
                if let Some(controller) = controller.upgrade() {
                    render(controller.view().await);
                }
            }
        });

        let previous = self.ticker.lock().replace(handle);
        drop(previous);
    }

    /// Tears the controller down: stops the age ticker and makes any
    /// response still in flight a no-op.
    pub async fn shutdown(&self) {
        self.torn_down.store(true, Ordering::Release);
        let ticker = self.ticker.lock().take();
        if let Some(ticker) = ticker {
            ticker.cancel().await;
        }
        debug!("controller shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    fn transition(&self, phase: Phase) {
        let mut screen = self.screen.lock();
        trace!(from = %screen.phase, to = %phase, "phase transition");
        screen.phase = phase;
    }
}
