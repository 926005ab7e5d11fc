//! String predicates

use regex::Regex;
use serde_json::Value;

use crate::error::ConfigError;
use crate::outcome::Outcome;
use crate::signature::Typs;
use crate::subject::Subject;

impl Typs {
    /// Require a string.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!("", "fortytwo").string().check() == true);
    /// assert!(typs!(["a", "b"]).string().check() == false);
    /// ```
    pub fn string(&self) -> Typs {
        self.add(|subject| {
            Outcome::from(matches!(subject, Subject::Value(Value::String(_))))
        })
    }

    /// Require a string (or number, tested through its decimal rendering)
    /// that matches `pattern`.
    ///
    /// The pattern is compiled when the step is attached; an invalid pattern
    /// is a [`ConfigError::InvalidPattern`].
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// let hex = typs().regex("^[0-9a-f]+$").unwrap();
    /// assert!(hex.check_on("c0ffee") == true);
    /// assert!(hex.check_on("coffee") == false);
    /// assert!(typs().regex("(").is_err());
    /// ```
    pub fn regex(&self, pattern: &str) -> Result<Typs, ConfigError> {
        let regex = Regex::new(pattern)?;
        Ok(self.regex_with(regex))
    }

    /// Like [`regex`](Typs::regex), with an already compiled expression.
    pub fn regex_with(&self, regex: Regex) -> Typs {
        self.add(move |subject| {
            let matched = match subject.as_value() {
                Some(Value::String(s)) => regex.is_match(s),
                Some(Value::Number(n)) => regex.is_match(&n.to_string()),
                _ => false,
            };
            Outcome::from(matched)
        })
    }
}
