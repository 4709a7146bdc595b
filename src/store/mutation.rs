//! Named transitions and actions.
//!
//! Both sets are closed enums so the handler tables below are exhaustive
//! matches. String names are only looked up for externally-sourced commands
//! (see [`Mutation::from_str`] and [`Action::from_str`]).

use super::state::State;
use super::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// A synchronous state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    Increment,
}

impl Mutation {
    pub const ALL: &'static [Mutation] = &[Mutation::Increment];

    pub fn name(self) -> &'static str {
        match self {
            Mutation::Increment => "increment",
        }
    }

    pub(crate) fn apply(self, state: &mut State) {
        match self {
            Mutation::Increment => state.count = state.count.saturating_add(1),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mutation {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mutation::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| StoreError::UnknownTransition(s.to_string()))
    }
}

/// An asynchronous orchestration unit. Actions never touch state; they
/// request mutations through an [`ActionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Wait for the configured delay, then commit [`Mutation::Increment`] once.
    Increment,
}

impl Action {
    pub const ALL: &'static [Action] = &[Action::Increment];

    pub fn name(self) -> &'static str {
        match self {
            Action::Increment => "increment",
        }
    }

    pub(crate) async fn run(self, ctx: ActionContext) {
        match self {
            Action::Increment => {
                ctx.wait_for_deadline().await;
                ctx.commit(Mutation::Increment);
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| StoreError::UnknownAction(s.to_string()))
    }
}

/// Handle given to a running action. Commits are queued back to the task
/// that owns the store rather than applied here.
pub(crate) struct ActionContext {
    pub(crate) action: Action,
    pub(crate) deadline: Instant,
    pub(crate) commit_tx: mpsc::UnboundedSender<Mutation>,
    pub(crate) _pending: PendingGuard,
}

impl ActionContext {
    async fn wait_for_deadline(&self) {
        tokio::time::sleep_until(self.deadline).await;
    }

    fn commit(&self, mutation: Mutation) {
        tracing::debug!(action = %self.action, %mutation, "action requested commit");
        if self.commit_tx.send(mutation).is_err() {
            tracing::warn!(action = %self.action, %mutation, "store dropped before delayed commit");
        }
    }
}

/// Keeps the store's in-flight counter accurate whether the action task
/// completes or is aborted.
pub(crate) struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    pub(crate) fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
