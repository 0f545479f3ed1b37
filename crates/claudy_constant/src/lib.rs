//! Shared constants for claudy.

pub mod app;
pub mod defaults;
