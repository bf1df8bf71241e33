//! Aggregated configuration-error reporting for graph construction.

use serde::Serialize;
use std::fmt;

///
/// ErrorTree
///
/// Flat collection of configuration errors, each optionally tagged with the
/// route (type or member path) it was found at. Build-time validation keeps
/// collecting instead of stopping at the first failure so a broken model
/// surfaces every authoring mistake in one run.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorTree {
    entries: Vec<ErrorEntry>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorEntry {
    pub route: Option<String>,
    pub message: String,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error with no route context.
    pub fn add(&mut self, message: impl fmt::Display) {
        self.entries.push(ErrorEntry {
            route: None,
            message: message.to_string(),
        });
    }

    /// Record an error found at a specific route.
    pub fn add_at(&mut self, route: impl Into<String>, message: impl fmt::Display) {
        self.entries.push(ErrorEntry {
            route: Some(route.into()),
            message: message.to_string(),
        });
    }

    /// Fold another tree's entries into this one.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate recorded entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }

    /// Collapse into a `Result`: `Ok` when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s)", self.entries.len())?;
        for entry in &self.entries {
            match &entry.route {
                Some(route) => write!(f, "\n  {route}: {}", entry.message)?,
                None => write!(f, "\n  {}", entry.message)?,
            }
        }

        Ok(())
    }
}

/// Record a formatted error into an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $errs.add(format!($fmt $(, $arg)*))
    };
}
