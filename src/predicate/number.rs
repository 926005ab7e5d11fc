//! Number predicates
//!
//! Numbers and numeric strings are both accepted: `"42"` is a number, and so
//! is `"-Infinity"`, the only way to spell an infinite value in JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::outcome::Outcome;
use crate::signature::Typs;
use crate::subject::Subject;

/// Numeric reading of a subject: numbers, and strings holding a decimal
/// literal or `Infinity`.
///
/// ```rust
/// use typs::{as_number, Subject};
///
/// assert_eq!(as_number(&Subject::from("2.5")), Some(2.5));
/// assert_eq!(as_number(&Subject::from("-Infinity")), Some(f64::NEG_INFINITY));
/// assert_eq!(as_number(&Subject::from("42a")), None);
/// assert_eq!(as_number(&Subject::from(vec![42])), None);
/// ```
pub fn as_number(subject: &Subject) -> Option<f64> {
    match subject.as_value()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // f64::from_str also accepts "inf" and "NaN", which are not numbers here.
    let literal = text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if literal {
        text.parse().ok()
    } else {
        None
    }
}

/// Numeric interval with optionally inclusive ends.
///
/// Both ends are exclusive unless switched on.
///
/// # Example
///
/// ```rust
/// use typs::{typs, Interval};
///
/// let unit = typs().interval(Interval::new(0.0, 1.0).with_include_start(true)).unwrap();
/// assert!(unit.check_on(0) == true);
/// assert!(unit.check_on(0.5) == true);
/// assert!(unit.check_on(1) == false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Whether `min` itself belongs to the interval.
    #[serde(default)]
    pub include_start: bool,
    /// Whether `max` itself belongs to the interval.
    #[serde(default)]
    pub include_end: bool,
}

impl Interval {
    /// The open interval `(min, max)`.
    pub fn new(min: f64, max: f64) -> Self {
        Interval {
            min,
            max,
            include_start: false,
            include_end: false,
        }
    }

    /// The closed interval `[min, max]`.
    pub fn closed(min: f64, max: f64) -> Self {
        Interval::new(min, max)
            .with_include_start(true)
            .with_include_end(true)
    }

    /// Set whether `min` is included.
    pub fn with_include_start(mut self, include: bool) -> Self {
        self.include_start = include;
        self
    }

    /// Set whether `max` is included.
    pub fn with_include_end(mut self, include: bool) -> Self {
        self.include_end = include;
        self
    }

    /// Read an interval from dynamic configuration such as
    /// `{"min": 0, "max": 10, "includeEnd": true}`.
    ///
    /// ```rust
    /// use typs::{ConfigError, Interval};
    /// use serde_json::json;
    ///
    /// let interval = Interval::from_value(&json!({"min": 0, "max": 10, "includeEnd": true})).unwrap();
    /// assert_eq!(interval, Interval::new(0.0, 10.0).with_include_end(true));
    ///
    /// let err = Interval::from_value(&json!({"min": "zero", "max": 10})).unwrap_err();
    /// assert!(matches!(err, ConfigError::Malformed { what: "interval", .. }));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let interval: Interval =
            serde_json::from_value(value.clone()).map_err(|e| ConfigError::Malformed {
                what: "interval",
                reason: e.to_string(),
            })?;
        interval.validate()?;
        Ok(interval)
    }

    /// Check that both bounds are numbers and are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_nan() {
            return Err(ConfigError::InvalidBound {
                name: "min",
                value: self.min,
            });
        }
        if self.max.is_nan() {
            return Err(ConfigError::InvalidBound {
                name: "max",
                value: self.max,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::UnorderedInterval {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Whether `n` lies within the interval.
    pub fn contains(&self, n: f64) -> bool {
        let above = if self.include_start {
            n >= self.min
        } else {
            n > self.min
        };
        let below = if self.include_end {
            n <= self.max
        } else {
            n < self.max
        };
        above && below
    }
}

fn numeric(test: impl Fn(f64) -> bool + Send + Sync + 'static) -> impl Fn(&Subject) -> Outcome {
    move |subject| Outcome::from(as_number(subject).is_some_and(&test))
}

impl Typs {
    /// Require a number or a numeric string.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!(42, 2.71, "42").number().check() == true);
    /// assert!(typs!("").number().check() == false);
    /// assert!(typs().number().check() == false);
    /// ```
    pub fn number(&self) -> Typs {
        self.add(numeric(|_| true))
    }

    /// Require a finite number.
    pub fn finite(&self) -> Typs {
        self.add(numeric(f64::is_finite))
    }

    /// Require an infinite number.
    pub fn infinite(&self) -> Typs {
        self.add(numeric(f64::is_infinite))
    }

    /// Require a number without a fractional part.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!(42, -42, 42.0).integer().check() == true);
    /// assert!(typs!(2.718).integer().check() == false);
    /// ```
    pub fn integer(&self) -> Typs {
        self.add(numeric(|n| n.is_finite() && n.fract() == 0.0))
    }

    /// Require a number greater than or equal to zero. Zero counts as
    /// positive.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!(42, 0).positive().check() == true);
    /// assert!(typs!("-Infinity").positive().check() == false);
    /// ```
    pub fn positive(&self) -> Typs {
        self.add(numeric(|n| n >= 0.0))
    }

    /// Require a number strictly below zero.
    pub fn negative(&self) -> Typs {
        self.add(numeric(|n| n < 0.0))
    }

    /// Require a number other than zero.
    pub fn not_zero(&self) -> Typs {
        self.add(numeric(|n| n != 0.0))
    }

    /// Require a number inside `interval`.
    ///
    /// Fails immediately with a [`ConfigError`] if the bounds are not
    /// numbers or are unordered.
    pub fn interval(&self, interval: Interval) -> Result<Typs, ConfigError> {
        interval.validate()?;
        Ok(self.add(numeric(move |n| interval.contains(n))))
    }
}
