//! Search-input debouncing.
//!
//! `SearchState` is the synchronous state machine, driven by explicit
//! timestamps. `Debouncer` runs the same rules on a tokio task and publishes
//! committed terms through a watch channel.

use crate::core::config::TableConfig;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing typed since the last commit
    Idle,
    /// Keystrokes waiting for the quiet period to elapse
    PendingDebounce { deadline: Instant },
}

/// Draft/committed pair for one search box
#[derive(Clone, Debug)]
pub struct SearchState {
    delay: Duration,
    draft: String,
    committed: String,
    phase: Phase,
}

impl SearchState {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            draft: String::new(),
            committed: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// A keystroke: replaces the draft and restarts the quiet period
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.draft = text.to_string();
        self.phase = Phase::PendingDebounce {
            deadline: now + self.delay,
        };
    }

    /// Commit the draft if the quiet period has elapsed. Returns the newly
    /// committed term when it differs from the previous one.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match self.phase {
            Phase::PendingDebounce { deadline } if now >= deadline => self.commit(),
            _ => None,
        }
    }

    /// Commit immediately, e.g. on Enter
    pub fn submit(&mut self) -> Option<&str> {
        self.commit()
    }

    /// Clear both draft and committed term at once
    pub fn clear(&mut self) -> Option<&str> {
        self.draft.clear();
        self.commit()
    }

    fn commit(&mut self) -> Option<&str> {
        self.phase = Phase::Idle;
        let term = self.draft.trim();
        if term == self.committed {
            return None;
        }
        self.committed = term.to_string();
        Some(&self.committed)
    }
}

/// Latest committed search term; `revision` increments on every change
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommittedTerm {
    pub term: String,
    pub revision: u64,
}

enum Input {
    Keystroke(String),
    Submit(String),
    Clear,
}

/// Debounced search input running on its own task.
///
/// Dropping the debouncer stops the task and discards any pending draft.
pub struct Debouncer {
    input: mpsc::UnboundedSender<Input>,
    committed: watch::Receiver<CommittedTerm>,
    handle: JoinHandle<()>,
}

impl Debouncer {
    pub fn spawn(delay: Duration) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (committed_tx, committed_rx) = watch::channel(CommittedTerm::default());
        let handle = tokio::spawn(run(delay, input_rx, committed_tx));

        Self {
            input: input_tx,
            committed: committed_rx,
            handle,
        }
    }

    /// Debouncer using the configured quiet period
    pub fn from_config(table: &TableConfig) -> Self {
        Self::spawn(table.debounce_delay())
    }

    pub fn input(&self, text: &str) {
        let _ = self.input.send(Input::Keystroke(text.to_string()));
    }

    pub fn submit(&self, text: &str) {
        let _ = self.input.send(Input::Submit(text.to_string()));
    }

    /// Empty the search box and commit at once
    pub fn clear(&self) {
        let _ = self.input.send(Input::Clear);
    }

    pub fn subscribe(&self) -> watch::Receiver<CommittedTerm> {
        self.committed.clone()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<Input>,
    committed: watch::Sender<CommittedTerm>,
) {
    let mut state = SearchState::new(delay);
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        let pending = matches!(state.phase(), Phase::PendingDebounce { .. });

        tokio::select! {
            msg = input.recv() => match msg {
                Some(Input::Keystroke(text)) => {
                    let now = Instant::now();
                    state.on_input(&text, now);
                    sleep.as_mut().reset(now + delay);
                }
                Some(Input::Submit(text)) => {
                    state.on_input(&text, Instant::now());
                    if let Some(term) = state.submit() {
                        publish(&committed, term);
                    }
                }
                Some(Input::Clear) => {
                    if let Some(term) = state.clear() {
                        publish(&committed, term);
                    }
                }
                None => break,
            },
            () = &mut sleep, if pending => {
                if let Some(term) = state.poll(Instant::now()) {
                    publish(&committed, term);
                }
            }
        }
    }
}

fn publish(committed: &watch::Sender<CommittedTerm>, term: &str) {
    debug!(term, "Search term committed");
    committed.send_modify(|current| {
        current.term = term.to_string();
        current.revision += 1;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_state_commits_after_quiet_period() {
        let start = Instant::now();
        let mut state = SearchState::new(DELAY);

        state.on_input("m", start);
        state.on_input("ma", start + Duration::from_millis(100));
        state.on_input("mat", start + Duration::from_millis(200));

        // 300ms after the first keystroke, but only 100ms after the last
        assert_eq!(state.poll(start + Duration::from_millis(300)), None);

        assert_eq!(state.poll(start + Duration::from_millis(500)), Some("mat"));
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn test_state_skips_unchanged_commit() {
        let start = Instant::now();
        let mut state = SearchState::new(DELAY);

        state.on_input(" mat ", start);
        assert_eq!(state.poll(start + DELAY), Some("mat"));

        state.on_input("mat", start + DELAY);
        assert_eq!(state.poll(start + DELAY * 2), None);
    }

    #[test]
    fn test_clear_commits_immediately() {
        let start = Instant::now();
        let mut state = SearchState::new(DELAY);
        state.on_input("mat", start);
        state.poll(start + DELAY);

        assert_eq!(state.clear(), Some(""));
        assert_eq!(state.phase(), &Phase::Idle);
        // draft is empty too, so a later commit has nothing new
        assert_eq!(state.submit(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_publishes_final_term_once() {
        let debouncer = Debouncer::spawn(DELAY);
        let mut rx = debouncer.subscribe();

        for text in ["m", "ma", "mat"] {
            debouncer.input(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(rx.borrow().revision, 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        rx.changed().await.unwrap();
        let committed = rx.borrow().clone();
        assert_eq!(committed.term, "mat");
        assert_eq!(committed.revision, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_bypasses_delay() {
        let debouncer = Debouncer::spawn(DELAY);
        let mut rx = debouncer.subscribe();

        debouncer.submit("fis");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().term, "fis");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_drops_pending_draft() {
        let debouncer = Debouncer::spawn(DELAY);
        let mut rx = debouncer.subscribe();

        debouncer.submit("fis");
        rx.changed().await.unwrap();

        debouncer.input("fisi");
        debouncer.clear();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().term, "");

        // the cleared keystroke never commits
        tokio::time::sleep(DELAY * 2).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_delay() {
        let table = TableConfig {
            debounce_ms: 50,
            ..TableConfig::default()
        };
        let debouncer = Debouncer::from_config(&table);
        let mut rx = debouncer.subscribe();

        debouncer.input("qui");
        tokio::time::sleep(Duration::from_millis(60)).await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().term, "qui");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_discards_pending_draft() {
        let debouncer = Debouncer::spawn(DELAY);
        let rx = debouncer.subscribe();

        debouncer.input("mat");
        drop(debouncer);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(rx.borrow().revision, 0);
    }
}
