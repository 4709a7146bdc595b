//! Core of a hash-routed single-page application.
//!
//! Two independent pieces:
//!
//! - [`store::Store`] holds application state. [`store::Mutation`]s are the
//!   only write path and apply synchronously; [`store::Action`]s run on tokio
//!   and queue mutations back to the store's owner.
//! - [`router::Router`] maps fragment paths to components, building deferred
//!   components on first navigation.
//!
//! [`app`] is a line-driven console that drives both from stdin.

pub mod app;
pub mod config;
pub mod logging;
pub mod router;
pub mod store;
