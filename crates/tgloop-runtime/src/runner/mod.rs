//! Long-polling update loop.
//!
//! One cycle: fetch a batch starting at `next_offset`, hand every update to
//! the bot in ascending id order, and after each hand-off set
//! `next_offset = id + 1`, whether the handler succeeded or not. A failed
//! fetch changes nothing, so the same batch is fetched again next cycle.
//! Docs: <https://core.telegram.org/bots/api#getupdates>

mod fetch;


use fetch::BatchItem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tgloop_core::{
    config::{DecodePolicy, PollingConfig, RetryPolicy},
    request::GetUpdates,
    traits::{Bot, Transport},
    types::Update,
};
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument, Span};

use crate::error::RunnerError;

/// Lifecycle of a runner. `Running` is entered once and never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    /// Stop was requested; the current cycle finishes, no new fetch starts.
    Stopping,
    Stopped,
}

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The batch was handed to the bot. `skipped` counts undecodable
    /// updates stepped over under [`DecodePolicy::Lenient`].
    Delivered { count: usize, skipped: usize },
    /// The long poll timed out with no updates.
    Empty,
    /// The fetch failed; the cursor did not move.
    FetchFailed,
}

struct Shared {
    stop: AtomicBool,
    state: watch::Sender<RunnerState>,
}

/// Requests a runner to stop. Cloneable and usable from any task.
#[derive(Clone)]
pub struct StopHandle {
    shared: Arc<Shared>,
}

impl StopHandle {
    /// Takes effect before the next fetch; an in-flight long poll and the
    /// batch it returns are finished first.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        self.shared.state.send_if_modified(|state| {
            if *state == RunnerState::Running {
                *state = RunnerState::Stopping;
                true
            } else {
                false
            }
        });
    }

    pub fn is_stop_requested(&self) -> bool {
        self.shared.stop.load(Ordering::SeqCst)
    }
}

/// Delivers updates to a bot via long polling.
pub struct LongPollingRunner {
    api: Arc<dyn Transport>,
    bot: Arc<dyn Bot>,
    limit: u32,
    timeout: u32,
    retry: RetryPolicy,
    decode: DecodePolicy,
    /// Owned here only; published read-only through `cursor`.
    next_offset: i64,
    consecutive_failures: u32,
    started: bool,
    shared: Arc<Shared>,
    cursor: watch::Sender<i64>,
    span: Span,
}

impl LongPollingRunner {
    /// Runner with the defaults: limit 100, timeout 5s, offset 0,
    /// immediate retry, strict decoding.
    pub fn new(api: Arc<dyn Transport>, bot: Arc<dyn Bot>) -> Self {
        let span = info_span!("runner", bot = bot.name());
        let (state, _) = watch::channel(RunnerState::Idle);
        let (cursor, _) = watch::channel(0);
        Self {
            api,
            bot,
            limit: 100,
            timeout: 5,
            retry: RetryPolicy::Immediate,
            decode: DecodePolicy::Strict,
            next_offset: 0,
            consecutive_failures: 0,
            started: false,
            shared: Arc::new(Shared {
                stop: AtomicBool::new(false),
                state,
            }),
            cursor,
            span,
        }
    }

    /// Runner configured from the `[polling]` section.
    pub fn from_config(api: Arc<dyn Transport>, bot: Arc<dyn Bot>, config: &PollingConfig) -> Self {
        let runner = Self::new(api, bot)
            .limit(config.limit)
            .timeout(config.timeout_secs)
            .retry(config.retry_policy())
            .decode(config.decode);
        match config.initial_offset {
            Some(offset) => runner.offset(offset),
            None => runner,
        }
    }

    /// Maximum number of updates per fetch.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Long-poll hold time in seconds.
    pub fn timeout(mut self, secs: u32) -> Self {
        self.timeout = secs;
        self
    }

    /// Starting cursor, e.g. one persisted by the host application.
    pub fn offset(mut self, offset: i64) -> Self {
        self.next_offset = offset;
        self.cursor.send_replace(offset);
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn decode(mut self, decode: DecodePolicy) -> Self {
        self.decode = decode;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            shared: self.shared.clone(),
        }
    }

    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    /// The offset the next fetch will request.
    pub fn next_offset(&self) -> i64 {
        self.next_offset
    }

    /// Observe cursor advances.
    pub fn cursor(&self) -> watch::Receiver<i64> {
        self.cursor.subscribe()
    }

    /// Observe lifecycle changes.
    pub fn state(&self) -> watch::Receiver<RunnerState> {
        self.shared.state.subscribe()
    }

    /// Run `on_start`, then poll until stopped.
    ///
    /// Only a failing `on_start` is returned as an error; fetch and handler
    /// failures are logged and the loop continues.
    pub async fn run(&mut self) -> Result<(), RunnerError> {
        if self.started {
            return Err(RunnerError::AlreadyStarted);
        }
        self.started = true;
        self.shared.state.send_replace(RunnerState::Running);
        if self.shared.stop.load(Ordering::SeqCst) {
            self.shared.state.send_replace(RunnerState::Stopping);
        }

        let span = self.span.clone();
        async {
            info!(
                offset = self.next_offset,
                limit = self.limit,
                timeout = self.timeout,
                "starting long polling"
            );
            if let Err(e) = self.bot.on_start(self.api.as_ref()).await {
                self.shared.state.send_replace(RunnerState::Stopped);
                return Err(RunnerError::Start(e));
            }

            while !self.shared.stop.load(Ordering::SeqCst) {
                if self.cycle().await == Cycle::FetchFailed {
                    if let Some(delay) = self.retry_delay() {
                        self.pause(delay).await;
                    }
                }
            }

            self.shared.state.send_replace(RunnerState::Stopping);
            info!(offset = self.next_offset, "long polling stopped");
            self.shared.state.send_replace(RunnerState::Stopped);
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Execute a single fetch-and-dispatch cycle.
    pub async fn poll_once(&mut self) -> Cycle {
        let span = self.span.clone();
        self.cycle().instrument(span).await
    }

    async fn cycle(&mut self) -> Cycle {
        let request = GetUpdates {
            offset: self.next_offset,
            limit: self.limit,
            timeout: self.timeout,
        };
        debug!(offset = request.offset, "fetching updates");

        let batch = match fetch::fetch(self.api.as_ref(), request, self.decode).await {
            Ok(batch) => batch,
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                error!(
                    offset = request.offset,
                    failures = self.consecutive_failures,
                    "failed to get updates: {e}"
                );
                return Cycle::FetchFailed;
            }
        };
        self.consecutive_failures = 0;

        if batch.is_empty() {
            return Cycle::Empty;
        }

        let mut count = 0;
        let mut skipped = 0;
        for item in batch {
            match item {
                BatchItem::Update(update) => {
                    let id = update.id;
                    self.dispatch(update).await;
                    self.advance(id);
                    count += 1;
                }
                BatchItem::Undecodable { id, error } => {
                    warn!(update_id = id, "skipping undecodable update: {error}");
                    self.advance(id);
                    skipped += 1;
                }
            }
        }
        Cycle::Delivered { count, skipped }
    }

    /// Hand one update to the bot. Errors and panics stay here.
    async fn dispatch(&self, update: Update) {
        let id = update.id;
        let kind = update.kind_name();
        let chat_id = update.chat_id();
        let bot = self.bot.clone();
        let api = self.api.clone();

        // Own task so a panicking handler cannot take the loop down.
        let handled = tokio::spawn(
            async move { bot.on_update(api.as_ref(), update).await }.in_current_span(),
        )
        .await;

        match handled {
            Ok(Ok(())) => debug!(update_id = id, kind, "update handled"),
            Ok(Err(e)) => error!(
                update_id = id,
                kind,
                chat_id,
                "error while handling update: {e:#}"
            ),
            Err(e) => error!(
                update_id = id,
                kind,
                chat_id,
                "update handler panicked: {e}"
            ),
        }
    }

    fn advance(&mut self, id: i64) {
        self.next_offset = self.next_offset.max(id.saturating_add(1));
        self.cursor.send_replace(self.next_offset);
    }

    fn retry_delay(&self) -> Option<Duration> {
        match self.retry {
            RetryPolicy::Immediate => None,
            RetryPolicy::Backoff { max } => Some(backoff_delay(self.consecutive_failures, max)),
        }
    }

    /// Sleep, but wake early when a stop is requested.
    async fn pause(&self, delay: Duration) {
        let mut state = self.shared.state.subscribe();
        debug!("retrying in {}s", delay.as_secs());
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = state.wait_for(|s| *s != RunnerState::Running) => {}
        }
    }
}

/// 1s, 2s, 4s, ... for consecutive failures, capped at `max`.
pub(crate) fn backoff_delay(failures: u32, max: Duration) -> Duration {
    let exp = failures.saturating_sub(1).min(16);
    Duration::from_secs(1u64 << exp).min(max)
}
