//! Configuration values supplied by the caller
//!
//! A [`ConfigNode`] is the parsed form of one job definition: scalars,
//! sequences, and mappings. Mappings keep their document order, which the
//! engine relies on when attaching fragments. The type deserializes with
//! serde, so callers produce it from YAML or JSON without this crate ever
//! touching source text.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// One node of a configuration document
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    /// Explicit null (YAML `~` or an empty value)
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating-point scalar
    Float(f64),
    /// String scalar
    String(String),
    /// Ordered sequence of nodes
    Sequence(Vec<ConfigNode>),
    /// Mapping in document order
    Mapping(Vec<(String, ConfigNode)>),
}

impl ConfigNode {
    /// Name of this node's kind, used in shape-error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigNode::Null => "null",
            ConfigNode::Bool(_) => "boolean",
            ConfigNode::Int(_) => "integer",
            ConfigNode::Float(_) => "number",
            ConfigNode::String(_) => "string",
            ConfigNode::Sequence(_) => "sequence",
            ConfigNode::Mapping(_) => "mapping",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, ConfigNode)]> {
        match self {
            ConfigNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// True for scalar kinds (everything except sequences and mappings)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigNode::Sequence(_) | ConfigNode::Mapping(_))
    }

    /// Render a scalar as the text that ends up in an XML element
    ///
    /// Returns `None` for sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            ConfigNode::Null => Some(String::new()),
            ConfigNode::Bool(b) => Some(b.to_string()),
            ConfigNode::Int(i) => Some(i.to_string()),
            ConfigNode::Float(f) => Some(f.to_string()),
            ConfigNode::String(s) => Some(s.clone()),
            ConfigNode::Sequence(_) | ConfigNode::Mapping(_) => None,
        }
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        ConfigNode::Bool(b)
    }
}

impl From<i64> for ConfigNode {
    fn from(i: i64) -> Self {
        ConfigNode::Int(i)
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        ConfigNode::String(s.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        ConfigNode::String(s)
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigNode::Null => serializer.serialize_unit(),
            ConfigNode::Bool(b) => serializer.serialize_bool(*b),
            ConfigNode::Int(i) => serializer.serialize_i64(*i),
            ConfigNode::Float(f) => serializer.serialize_f64(*f),
            ConfigNode::String(s) => serializer.serialize_str(s),
            ConfigNode::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigNode::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

struct ConfigNodeVisitor;

impl<'de> Visitor<'de> for ConfigNodeVisitor {
    type Value = ConfigNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, sequence, or mapping")
    }

    fn visit_unit<E: de::Error>(self) -> Result<ConfigNode, E> {
        Ok(ConfigNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ConfigNode, E> {
        Ok(ConfigNode::Null)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<ConfigNode, E> {
        Ok(ConfigNode::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<ConfigNode, E> {
        Ok(ConfigNode::Int(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<ConfigNode, E> {
        i64::try_from(u)
            .map(ConfigNode::Int)
            .map_err(|_| E::custom(format!("integer {} out of range", u)))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<ConfigNode, E> {
        Ok(ConfigNode::Float(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<ConfigNode, E> {
        Ok(ConfigNode::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<ConfigNode, E> {
        Ok(ConfigNode::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ConfigNode, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ConfigNode::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigNode, A::Error> {
        let mut entries: Vec<(String, ConfigNode)> = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, ConfigNode>()? {
            entries.push((key, value));
        }
        Ok(ConfigNode::Mapping(entries))
    }
}

impl<'de> Deserialize<'de> for ConfigNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<ConfigNode, D::Error> {
        deserializer.deserialize_any(ConfigNodeVisitor)
    }
}

/// Shorthand for building a mapping node in registration code and tests
pub fn mapping<I>(entries: I) -> ConfigNode
where
    I: IntoIterator<Item = (&'static str, ConfigNode)>,
{
    ConfigNode::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}
