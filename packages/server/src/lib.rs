//! Watch-together session server.
//!
//! Keeps every connected client of one viewing session in sync: who is
//! present, a bounded chat history, the shared playback position, and polls.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod bootstrap;
