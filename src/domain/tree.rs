//! Generic data tree produced by the source readers.
//!
//! A portfolio file is parsed into a [`Node`] before anything is known about
//! its shape. Mappings keep their keys in insertion order so that traversal
//! order matches the order of the source document.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Numeric view of the scalar. Text is trimmed and parsed as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
            Scalar::Null | Scalar::Bool(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            // Whole floats print without a fraction, so 1.0 and 1 share a
            // symbol and a price key.
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Vec<(String, Node)>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::Text(value.into()))
    }

    pub fn empty() -> Self {
        Node::Sequence(Vec::new())
    }

    /// Looks up a key on a mapping node. Returns `None` for other variants.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// True when this is a mapping carrying every one of `keys`.
    pub fn has_keys(&self, keys: &[&str]) -> bool {
        match self {
            Node::Mapping(entries) => keys
                .iter()
                .all(|key| entries.iter().any(|(k, _)| k == key)),
            _ => false,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Indented structural dump, one line per key, element and leaf value.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(0, &mut lines);
        lines
    }

    fn outline_into(&self, depth: usize, lines: &mut Vec<String>) {
        let prefix = "  ".repeat(depth);
        match self {
            Node::Mapping(entries) => {
                for (key, value) in entries {
                    lines.push(format!("{prefix}Key: {key}"));
                    value.outline_into(depth + 1, lines);
                }
            }
            Node::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    lines.push(format!("{prefix}Item [{i}]"));
                    item.outline_into(depth + 1, lines);
                }
            }
            Node::Scalar(s) => lines.push(format!("{prefix}Value: {s}")),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Scalar(Scalar::Integer(i)),
                None => Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Node::Scalar(Scalar::Text(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}
