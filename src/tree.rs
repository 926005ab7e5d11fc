//! Structural matching against nested type trees
//!
//! A [`TypeTree`] describes the expected shape of a subject. Each node is
//! one of:
//!
//! - a [`Leaf`](TypeTree::Leaf): a chain the subject must check against,
//! - [`Fields`](TypeTree::Fields): a mapping from field name to sub-tree,
//!   matched recursively against the subject's fields,
//! - a [`Literal`](TypeTree::Literal): a value the subject must deeply equal.
//!
//! Matching is open: fields of the subject that the tree does not mention are
//! ignored. Only a declared field that is missing or that fails its sub-tree
//! causes a mismatch.
//!
//! # Example
//!
//! ```rust
//! use typs::{typs, TypeTree};
//! use serde_json::json;
//!
//! let shape = TypeTree::fields([
//!     ("a", TypeTree::fields([("b", typs().number().into())])),
//!     ("c", typs().string().into()),
//! ]);
//!
//! assert!(typs!(json!({"a": {"b": 5}, "c": "five"})).is(shape.clone()) == true);
//! assert!(typs!(json!({"a": {"b": 5}, "c": "five", "d": 0})).is(shape.clone()) == true);
//! assert!(typs!(json!({"a": {"b": 5}})).is(shape) == false);
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::outcome::Outcome;
use crate::signature::Typs;
use crate::subject::Subject;

/// A node of a type tree.
#[derive(Debug, Clone)]
pub enum TypeTree {
    /// The subject must check against this chain.
    Leaf(Typs),
    /// The subject must be keyable and each named field must match its node.
    Fields(BTreeMap<String, TypeTree>),
    /// The subject must deeply equal this value.
    Literal(Value),
}

impl TypeTree {
    /// A mapping node built from `(name, node)` pairs.
    pub fn fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, TypeTree)>,
        K: Into<String>,
    {
        TypeTree::Fields(
            fields
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// A literal node.
    pub fn literal(value: impl Into<Value>) -> Self {
        TypeTree::Literal(value.into())
    }

    /// Read a tree from a JSON value: objects become mapping nodes and every
    /// other value becomes a literal.
    ///
    /// ```rust
    /// use typs::{typs, TypeTree};
    /// use serde_json::json;
    ///
    /// let tree = TypeTree::from_value(json!({"kind": "point", "dims": 2}));
    /// assert!(typs!(json!({"kind": "point", "dims": 2, "x": 1})).is(tree.clone()) == true);
    /// assert!(typs!(json!({"kind": "line", "dims": 2})).is(tree) == false);
    /// ```
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => TypeTree::Fields(
                map.into_iter()
                    .map(|(name, node)| (name, TypeTree::from_value(node)))
                    .collect(),
            ),
            other => TypeTree::Literal(other),
        }
    }

    /// Add or replace a field of a mapping node. Any other node is replaced
    /// by a mapping holding just this field.
    pub fn with_field(self, name: impl Into<String>, node: impl Into<TypeTree>) -> Self {
        let mut fields = match self {
            TypeTree::Fields(fields) => fields,
            _ => BTreeMap::new(),
        };
        fields.insert(name.into(), node.into());
        TypeTree::Fields(fields)
    }

    /// Match `subject` against this node.
    pub fn match_subject(&self, subject: &Subject) -> Outcome {
        match self {
            TypeTree::Leaf(signature) => signature.check_on(subject.clone()),
            TypeTree::Literal(expected) => Outcome::from(
                subject
                    .as_value()
                    .is_some_and(|value| crate::subject::deep_equals(value, expected)),
            ),
            TypeTree::Fields(fields) => {
                if !subject.is_keyable() {
                    return Outcome::Resolved(false);
                }
                Outcome::all(
                    fields
                        .iter()
                        .map(|(name, node)| node.match_subject(&subject.get(name))),
                )
            }
        }
    }
}

impl From<Typs> for TypeTree {
    fn from(signature: Typs) -> Self {
        TypeTree::Leaf(signature)
    }
}

impl From<Value> for TypeTree {
    fn from(value: Value) -> Self {
        TypeTree::from_value(value)
    }
}

impl Typs {
    /// Require subjects to structurally match `tree`.
    pub fn matches(&self, tree: impl Into<TypeTree>) -> Typs {
        let tree = tree.into();
        self.add(move |subject| tree.match_subject(subject))
    }

    /// Shortcut for `matches(tree).check()`.
    pub fn is(&self, tree: impl Into<TypeTree>) -> Outcome {
        self.matches(tree).check()
    }

    /// Shortcut for `not(tree).check()`: every stored subject must fail to
    /// match `tree`.
    pub fn isnt(&self, tree: impl Into<TypeTree>) -> Outcome {
        self.not(tree).check()
    }
}
