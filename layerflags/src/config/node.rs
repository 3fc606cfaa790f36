//! Generic document tree and the flattening shared by structured parsers.

use super::Setter;
use crate::{FlagError, FlagResult};

/// Format-independent view of a decoded config document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Key/value entries in document order.
    Mapping(Vec<(String, Node)>),
    /// Ordered elements.
    Sequence(Vec<Node>),
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar too large for `i64`.
    UInt(u64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Scalar with no flag representation, such as `null` or a datetime.
    Unsupported(String),
}

/// Walks `node`, calling `set` with delimiter-joined paths.
///
/// Mapping keys extend the path, sequence elements reuse it (so one name
/// can receive several values), and scalars are rendered as text.
///
/// # Errors
///
/// Returns [`FlagError::StringConversion`] for [`Node::Unsupported`] scalars
/// and propagates errors from `set`.
///
/// # Examples
///
/// ```
/// use layerflags::config::{Node, flatten};
///
/// let doc = Node::Mapping(vec![(
///     "server".into(),
///     Node::Mapping(vec![("port".into(), Node::Int(8080))]),
/// )]);
/// let mut seen = Vec::new();
/// flatten(&doc, ".", &mut |name: &str, value: &str| {
///     seen.push(format!("{name}={value}"));
///     Ok(())
/// })?;
/// assert_eq!(seen, ["server.port=8080"]);
/// # Ok::<_, layerflags::FlagError>(())
/// ```
pub fn flatten(node: &Node, delimiter: &str, set: &mut Setter<'_>) -> FlagResult<()> {
    walk(None, node, delimiter, set)
}

fn walk(path: Option<&str>, node: &Node, delimiter: &str, set: &mut Setter<'_>) -> FlagResult<()> {
    let name = path.unwrap_or_default();
    match node {
        Node::Mapping(entries) => {
            for (key, child) in entries {
                let child_path = match path {
                    Some(parent) => format!("{parent}{delimiter}{key}"),
                    None => key.clone(),
                };
                walk(Some(&child_path), child, delimiter, set)?;
            }
            Ok(())
        }
        Node::Sequence(items) => {
            for item in items {
                walk(path, item, delimiter, set)?;
            }
            Ok(())
        }
        Node::Bool(value) => set(name, &value.to_string()),
        Node::Int(value) => set(name, &value.to_string()),
        Node::UInt(value) => set(name, &value.to_string()),
        Node::Float(value) => set(name, &value.to_string()),
        Node::String(value) => set(name, value),
        Node::Unsupported(value) => Err(FlagError::StringConversion {
            value: value.clone(),
        }),
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Unsupported(String::from("null")),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_u64().map(Self::UInt))
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Unsupported(n.to_string())),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::Value> for Node {
    fn from(value: toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::String(s) => Self::String(s),
            Value::Integer(i) => Self::Int(i),
            Value::Float(f) => Self::Float(f),
            Value::Boolean(b) => Self::Bool(b),
            Value::Datetime(d) => Self::Unsupported(format!("datetime {d}")),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => Self::Mapping(
                table
                    .into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}
