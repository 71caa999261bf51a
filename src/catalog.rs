/*!
 * Catalog tree model.
 *
 * A localization catalog is an ordered, recursively nested key/value tree
 * whose leaves are strings, numbers, booleans or null. This module provides
 * the `CatalogNode` sum type together with lossless, order-preserving
 * conversion from and to JSON text.
 *
 * serde_json is built with the `preserve_order` feature, so object key order
 * survives a parse/serialize round trip. Serialized output is pretty-printed
 * with non-ASCII characters written literally.
 */

use serde_json::Value;

use crate::errors::CatalogError;

/// One node of a localization catalog tree.
///
/// Internal nodes are `Mapping` (keyed, insertion order preserved) or
/// `Sequence`; terminal nodes are `Text` (the only translatable kind) or
/// `Scalar` (number, boolean or null, carried verbatim).
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogNode {
    /// Keyed mapping, keys in source order
    Mapping(Vec<(String, CatalogNode)>),

    /// Ordered sequence of nodes
    Sequence(Vec<CatalogNode>),

    /// Translatable string leaf
    Text(String),

    /// Non-string leaf (number, boolean, null), never translated
    Scalar(Value),
}

impl CatalogNode {
    /// Parse a catalog tree from JSON text
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self::from_value(value))
    }

    /// Build a catalog node from a parsed JSON value
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, child)| (key, Self::from_value(child)))
                    .collect();
                CatalogNode::Mapping(entries)
            }
            Value::Array(items) => {
                CatalogNode::Sequence(items.into_iter().map(Self::from_value).collect())
            }
            Value::String(text) => CatalogNode::Text(text),
            scalar => CatalogNode::Scalar(scalar),
        }
    }

    /// Convert the node back into a JSON value, keeping key order
    pub fn to_value(&self) -> Value {
        match self {
            CatalogNode::Mapping(entries) => {
                let mut map = serde_json::Map::new();
                for (key, child) in entries {
                    map.insert(key.clone(), child.to_value());
                }
                Value::Object(map)
            }
            CatalogNode::Sequence(items) => {
                Value::Array(items.iter().map(CatalogNode::to_value).collect())
            }
            CatalogNode::Text(text) => Value::String(text.clone()),
            CatalogNode::Scalar(scalar) => scalar.clone(),
        }
    }

    /// Serialize the tree to pretty-printed JSON with a trailing newline
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut rendered = serde_json::to_string_pretty(&self.to_value())
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Number of translatable string leaves in the tree
    ///
    /// Counts `Text` children of mappings and string elements of sequences,
    /// matching exactly what the tree translator will send to the backend.
    pub fn text_leaf_count(&self) -> usize {
        match self {
            CatalogNode::Mapping(entries) => {
                entries.iter().map(|(_, child)| child.text_leaf_count()).sum()
            }
            CatalogNode::Sequence(items) => items
                .iter()
                .filter(|item| matches!(item, CatalogNode::Text(_)))
                .count(),
            CatalogNode::Text(_) => 1,
            CatalogNode::Scalar(_) => 0,
        }
    }

    /// Whether the root of this tree is a mapping
    pub fn is_mapping(&self) -> bool {
        matches!(self, CatalogNode::Mapping(_))
    }

    /// Set a top-level key on a root mapping, appending when absent.
    ///
    /// Returns false (and leaves the tree untouched) when the root is not a
    /// mapping; the RTL marker is only meaningful on mapping roots.
    pub fn set_root_key(&mut self, key: &str, value: Value) -> bool {
        match self {
            CatalogNode::Mapping(entries) => {
                if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
                    entry.1 = CatalogNode::Scalar(value);
                } else {
                    entries.push((key.to_string(), CatalogNode::Scalar(value)));
                }
                true
            }
            _ => false,
        }
    }
}
