//! Console front end: transcript state, event handling, and command parsing.

pub mod command;
pub mod event;
pub mod handler;
pub mod state;
pub mod view;
