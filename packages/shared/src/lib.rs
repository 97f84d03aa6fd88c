//! Shared utilities for the Sajiki watch-together server and its tests.

pub mod logger;
pub mod time;
