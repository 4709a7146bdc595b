//! Centralized state store.
//!
//! A [`Store`] owns the [`State`] record. Synchronous [`Mutation`]s are the
//! only write path. [`Action`]s run as tokio tasks and queue their mutations
//! back to the store, where they are applied by the owning task through
//! [`Store::next_commit`] or [`Store::drain_ready`].

pub mod mutation;
pub mod state;

pub use mutation::{Action, Mutation};
pub use state::State;

use crate::config::StoreConfig;
use mutation::{ActionContext, PendingGuard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown transition: {0}")]
    UnknownTransition(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// Handle to a scheduled action.
///
/// Dropping the handle does not cancel the action; it still commits once
/// its delay expires. Call [`ActionHandle::cancel`] to stop it.
#[derive(Debug)]
pub struct ActionHandle {
    action: Action,
    task: JoinHandle<()>,
}

impl ActionHandle {
    pub fn action(&self) -> Action {
        self.action
    }

    /// Abort the action if it has not fired yet. A commit that was already
    /// queued is still applied.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct Store {
    state: State,
    action_delay: Duration,
    commits: u64,
    in_flight: Arc<AtomicUsize>,
    commit_tx: mpsc::UnboundedSender<Mutation>,
    commit_rx: mpsc::UnboundedReceiver<Mutation>,
    watch_tx: watch::Sender<State>,
}

impl Store {
    pub fn new(initial: State, action_delay: Duration) -> Self {
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        let (watch_tx, _) = watch::channel(initial);
        Self {
            state: initial,
            action_delay,
            commits: 0,
            in_flight: Arc::new(AtomicUsize::new(0)),
            commit_tx,
            commit_rx,
            watch_tx,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            State::new(config.initial_count),
            Duration::from_millis(config.action_delay_ms),
        )
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Getter: `2 * count` at call time.
    pub fn double(&self) -> i64 {
        self.state.double()
    }

    pub fn action_delay(&self) -> Duration {
        self.action_delay
    }

    /// Number of mutations applied since construction.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Actions scheduled but not yet fired (or cancelled).
    pub fn pending_actions(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Subscribe to state changes. The receiver sees the state after every
    /// commit.
    pub fn watch(&self) -> watch::Receiver<State> {
        self.watch_tx.subscribe()
    }

    pub fn commit(&mut self, mutation: Mutation) {
        let before = self.state.count;
        mutation.apply(&mut self.state);
        self.commits += 1;
        tracing::debug!(%mutation, before, after = self.state.count, "mutation applied");
        self.watch_tx.send_replace(self.state);
    }

    /// Commit a mutation named by an external source.
    pub fn commit_named(&mut self, name: &str) -> Result<Mutation, StoreError> {
        let mutation: Mutation = name.parse()?;
        self.commit(mutation);
        Ok(mutation)
    }

    /// Schedule an action and return immediately.
    ///
    /// The deadline is fixed here, so actions dispatched with the same delay
    /// fire in dispatch order. Must be called from within a tokio runtime.
    pub fn dispatch(&self, action: Action) -> ActionHandle {
        let ctx = ActionContext {
            action,
            deadline: Instant::now() + self.action_delay,
            commit_tx: self.commit_tx.clone(),
            _pending: PendingGuard::new(self.in_flight.clone()),
        };
        tracing::debug!(%action, delay_ms = self.action_delay.as_millis() as u64, "action scheduled");
        let task = tokio::spawn(action.run(ctx));
        ActionHandle { action, task }
    }

    /// Dispatch an action named by an external source.
    pub fn dispatch_named(&self, name: &str) -> Result<ActionHandle, StoreError> {
        let action: Action = name.parse()?;
        Ok(self.dispatch(action))
    }

    /// Wait for the next mutation requested by an action and apply it.
    ///
    /// Pends while nothing is queued. Cancel safe: a mutation is either
    /// still queued or already applied.
    pub async fn next_commit(&mut self) -> Option<Mutation> {
        let mutation = self.commit_rx.recv().await?;
        self.commit(mutation);
        Some(mutation)
    }

    /// Apply every mutation already queued by fired actions, without waiting.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(mutation) = self.commit_rx.try_recv() {
            self.commit(mutation);
            applied += 1;
        }
        applied
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}
