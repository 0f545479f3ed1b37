//! Context gathered before the request: recent history, optional
//! supplementary text, and a description of the user's system.
//!
//! History and supplement are optional enrichment. Failing to read them is
//! reported as an [`Enrichment`] variant, never as an error.

pub mod history;
pub mod supplement;
pub mod system;

use std::io;

pub use history::{HistoryContext, HistoryContextBuilder};
pub use supplement::load_supplement;
pub use system::SystemInfo;

/// Outcome of loading an optional input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    Loaded(T),
    /// The source does not exist
    Missing,
    /// The source exists but could not be read or decoded
    Unreadable(String),
}

impl<T> Enrichment<T> {
    /// Classify an I/O result: not-found is `Missing`, any other error `Unreadable`.
    pub fn from_io(result: io::Result<T>) -> Self {
        match result {
            Ok(value) => Enrichment::Loaded(value),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Enrichment::Missing,
            Err(e) => Enrichment::Unreadable(e.to_string()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Enrichment::Loaded(_))
    }

    pub fn into_loaded(self) -> Option<T> {
        match self {
            Enrichment::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Enrichment<U> {
        match self {
            Enrichment::Loaded(value) => Enrichment::Loaded(f(value)),
            Enrichment::Missing => Enrichment::Missing,
            Enrichment::Unreadable(reason) => Enrichment::Unreadable(reason),
        }
    }
}

impl<T: Default> Enrichment<T> {
    pub fn unwrap_or_default(self) -> T {
        self.into_loaded().unwrap_or_default()
    }
}
