//! Error types for markup tree construction

use std::fmt;

/// Errors raised while assembling a markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A child kind was attached under a parent kind that does not accept it.
    InvalidChild {
        parent: &'static str,
        child: &'static str,
    },
    /// A builder was closed past its root.
    UnbalancedClose,
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::InvalidChild { parent, child } => {
                write!(f, "{} cannot contain {} entities", parent, child)
            }
            MarkupError::UnbalancedClose => {
                write!(f, "close() called with no open entity")
            }
        }
    }
}

impl std::error::Error for MarkupError {}

pub type MarkupResult<T> = Result<T, MarkupError>;
