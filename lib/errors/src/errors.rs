use std::fmt::Display;

use derive_more::{Deref, IntoIterator};
use itertools::Itertools;
use log::debug;

pub use cursor::Line;

/// Anything the scanner and parser can hand their errors to.
pub trait Reporter {
    /// `location` is either empty or starts with a space, e.g. `" at end"`.
    fn report(&mut self, line: Line, location: &str, message: &str);
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub line: Line,
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: Line, location: impl ToString, message: impl ToString) -> Self {
        Self { line, location: location.to_string(), message: message.to_string() }
    }
}

/// Every diagnostic produced by one run of the front end, in the order reported.
#[derive(thiserror::Error, Clone, Debug, Default, PartialEq, Deref, IntoIterator)]
pub struct Diagnostics(#[into_iterator(owned, ref)] pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        debug!("{diagnostic}");
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        for diagnostic in other {
            self.push(diagnostic);
        }
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, line: Line, location: &str, message: &str) {
        self.push(Diagnostic::new(line, location, message));
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}
