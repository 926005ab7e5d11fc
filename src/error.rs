//! Error types for type signatures.
//!
//! Two error channels live here and are never conflated with each other or
//! with validation outcomes:
//!
//! - [`ConfigError`] is returned by builder methods that receive malformed
//!   configuration (unordered bounds, invalid patterns, a non-collection
//!   domain). It is raised at attachment time, before any subject is seen.
//! - [`Rejection`] is the failure of an evaluation itself: an asynchronous
//!   predicate that rejected, or a transformer that could not enumerate a
//!   subject. It terminates the whole chain instead of turning into `false`.
//!
//! A subject that simply fails a constraint is neither of these: it is an
//! ordinary `false` outcome.

use std::error::Error as StdError;
use std::fmt;

/// Error raised when a chain method receives malformed configuration.
///
/// # Examples
///
/// ```rust
/// use typs::{typs, ConfigError, LengthBounds};
///
/// let err = typs().len(LengthBounds::new()).unwrap_err();
/// assert_eq!(err, ConfigError::MissingLengthBounds);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Length bounds were supplied without any of `min`, `max` or `exact`.
    MissingLengthBounds,
    /// Length bounds where `min` exceeds `max`.
    UnorderedLength {
        /// The lower bound.
        min: usize,
        /// The upper bound.
        max: usize,
    },
    /// A numeric bound that is not a number.
    InvalidBound {
        /// Which bound was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// An interval whose `min` exceeds its `max`.
    UnorderedInterval {
        /// The lower bound.
        min: f64,
        /// The upper bound.
        max: f64,
    },
    /// Dynamic configuration that does not have the expected shape.
    Malformed {
        /// What was being configured.
        what: &'static str,
        /// Why the configuration was rejected.
        reason: String,
    },
    /// A regular expression that failed to compile.
    InvalidPattern(regex::Error),
    /// An operation that requires a collection-like argument got something else.
    NotCollection {
        /// The chain method that was called.
        operation: &'static str,
        /// The kind of value it received.
        found: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingLengthBounds => {
                write!(f, "length bounds require at least one of min, max or exact")
            }
            ConfigError::UnorderedLength { min, max } => {
                write!(f, "length bounds are unordered: min {} > max {}", min, max)
            }
            ConfigError::InvalidBound { name, value } => {
                write!(f, "interval bound `{}` is not a number: {}", name, value)
            }
            ConfigError::UnorderedInterval { min, max } => {
                write!(f, "interval bounds are unordered: min {} > max {}", min, max)
            }
            ConfigError::Malformed { what, reason } => {
                write!(f, "malformed {} configuration: {}", what, reason)
            }
            ConfigError::InvalidPattern(err) => write!(f, "invalid pattern: {}", err),
            ConfigError::NotCollection { operation, found } => {
                write!(f, "{}() expects a collection-like value, got {}", operation, found)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::InvalidPattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<regex::Error> for ConfigError {
    fn from(err: regex::Error) -> Self {
        ConfigError::InvalidPattern(err)
    }
}

/// Boxed error carried by a rejected predicate.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error that terminates the evaluation of a chain.
///
/// # Examples
///
/// ```rust
/// use typs::Rejection;
///
/// let rejection = Rejection::msg("service unavailable");
/// assert_eq!(rejection.to_string(), "predicate rejected: service unavailable");
/// ```
#[derive(Debug)]
pub enum Rejection {
    /// A key-enumerating transformer reached a subject that has no keys.
    NotKeyable {
        /// The transformer that was running.
        operation: &'static str,
        /// The kind of subject it received.
        found: &'static str,
    },
    /// A predicate failed to produce a verdict.
    Predicate(BoxError),
}

impl Rejection {
    /// Wrap any error as a predicate rejection.
    pub fn new(err: impl Into<BoxError>) -> Self {
        Rejection::Predicate(err.into())
    }

    /// Create a predicate rejection from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Rejection::Predicate(message.into().into())
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotKeyable { operation, found } => {
                write!(f, "{}() cannot enumerate the keys of {}", operation, found)
            }
            Rejection::Predicate(err) => write!(f, "predicate rejected: {}", err),
        }
    }
}

impl StdError for Rejection {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Rejection::Predicate(err) => Some(err.as_ref()),
            Rejection::NotKeyable { .. } => None,
        }
    }
}
