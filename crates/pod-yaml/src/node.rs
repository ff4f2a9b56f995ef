//! YAML node with source location and type tag tracking.

use crate::SourceInfo;

/// Structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Mapping,
    Sequence,
}

/// Resolved core-schema tag of a scalar.
///
/// Quoted and block scalars are always `Str`; plain scalars are resolved from
/// their text (`8080` is `Int`, `web` is `Str`, `~` is `Null`). Mappings and
/// sequences carry `Str` as a placeholder and should be distinguished through
/// [`YamlNode::kind`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarTag {
    Str,
    Int,
    Float,
    Bool,
    Null,
    Timestamp,
    /// Any explicit tag outside the core set, e.g. `!foo` or `!!binary`
    Other,
}

impl ScalarTag {
    /// Resolve an explicit core tag suffix (`str` in `!!str`).
    pub(crate) fn from_core_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "str" => Some(ScalarTag::Str),
            "int" => Some(ScalarTag::Int),
            "float" => Some(ScalarTag::Float),
            "bool" => Some(ScalarTag::Bool),
            "null" => Some(ScalarTag::Null),
            "timestamp" => Some(ScalarTag::Timestamp),
            _ => None,
        }
    }
}

/// A YAML node with source location information.
///
/// Scalars carry their raw `text` (after unquoting) and resolved `tag`.
/// Mappings and sequences carry ordered children and an empty `text`.
///
/// ## Example
///
/// ```rust
/// use pod_yaml::{parse, NodeKind};
///
/// let root = parse("containers:\n  - name: web\n").unwrap().unwrap();
/// let containers = root.get_hash_value("containers").unwrap();
/// assert_eq!(containers.kind(), NodeKind::Sequence);
/// assert_eq!(containers.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    /// Scalar text exactly as loaded (quotes removed, escapes applied).
    pub text: String,

    /// Resolved type tag.
    pub tag: ScalarTag,

    /// Source location for this node.
    pub source_info: SourceInfo,

    /// Source-tracked children.
    children: Children,
}

#[derive(Debug, Clone, PartialEq)]
enum Children {
    /// No children (for scalars)
    None,

    /// Sequence elements
    Array(Vec<YamlNode>),

    /// Mapping entries in source order, duplicates included
    Hash(Vec<YamlHashEntry>),
}

/// A key-value pair in a YAML mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlHashEntry {
    pub key: YamlNode,
    pub value: YamlNode,
}

impl YamlNode {
    /// Create a scalar node.
    pub fn new_scalar(text: impl Into<String>, tag: ScalarTag, source_info: SourceInfo) -> Self {
        Self {
            text: text.into(),
            tag,
            source_info,
            children: Children::None,
        }
    }

    /// Create a sequence node.
    pub fn new_array(source_info: SourceInfo, items: Vec<YamlNode>) -> Self {
        Self {
            text: String::new(),
            tag: ScalarTag::Str,
            source_info,
            children: Children::Array(items),
        }
    }

    /// Create a mapping node.
    pub fn new_hash(source_info: SourceInfo, entries: Vec<YamlHashEntry>) -> Self {
        Self {
            text: String::new(),
            tag: ScalarTag::Str,
            source_info,
            children: Children::Hash(entries),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.children {
            Children::None => NodeKind::Scalar,
            Children::Array(_) => NodeKind::Sequence,
            Children::Hash(_) => NodeKind::Mapping,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::None)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.children, Children::Array(_))
    }

    pub fn is_hash(&self) -> bool {
        matches!(self.children, Children::Hash(_))
    }

    /// 1-based source line.
    pub fn line(&self) -> usize {
        self.source_info.line
    }

    /// Scalar text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// True for scalars carrying the `!!str` tag, quoted or not.
    pub fn is_string_tagged(&self) -> bool {
        self.is_scalar() && self.tag == ScalarTag::Str
    }

    /// Get sequence elements if this is a sequence.
    pub fn as_array(&self) -> Option<&[YamlNode]> {
        match &self.children {
            Children::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get mapping entries if this is a mapping.
    pub fn as_hash(&self) -> Option<&[YamlHashEntry]> {
        match &self.children {
            Children::Hash(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a value from a mapping by key.
    ///
    /// Every entry is scanned in order and a later entry with the same key
    /// replaces an earlier match, so duplicate keys resolve to their last
    /// occurrence. Returns `None` for non-mappings and for missing keys.
    pub fn get_hash_value(&self, key: &str) -> Option<&YamlNode> {
        let entries = self.as_hash()?;
        let mut found = None;
        for entry in entries {
            if entry.key.is_scalar() && entry.key.text == key {
                found = Some(&entry.value);
            }
        }
        found
    }

    /// Get a sequence element by index.
    pub fn get_array_item(&self, index: usize) -> Option<&YamlNode> {
        self.as_array()?.get(index)
    }

    /// Number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Array(items) => items.len(),
            Children::Hash(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of this node relocated to `source_info`, used when expanding aliases.
    pub(crate) fn relocated(&self, source_info: SourceInfo) -> Self {
        Self {
            source_info,
            ..self.clone()
        }
    }
}

impl YamlHashEntry {
    pub fn new(key: YamlNode, value: YamlNode) -> Self {
        Self { key, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(text: &str) -> YamlNode {
        YamlNode::new_scalar(text, ScalarTag::Str, SourceInfo::default())
    }

    fn scalar_at(text: &str, line: usize) -> YamlNode {
        YamlNode::new_scalar(
            text,
            ScalarTag::Str,
            SourceInfo::new(None, 0, line, 1, text.len()),
        )
    }

    #[test]
    fn test_scalar_creation() {
        let node = scalar("test");
        assert_eq!(node.kind(), NodeKind::Scalar);
        assert!(node.is_scalar());
        assert!(!node.is_array());
        assert!(!node.is_hash());
        assert_eq!(node.len(), 0);
        assert!(node.is_string_tagged());
    }

    #[test]
    fn test_array_creation() {
        let node = YamlNode::new_array(SourceInfo::default(), vec![scalar("a"), scalar("b")]);
        assert_eq!(node.kind(), NodeKind::Sequence);
        assert_eq!(node.len(), 2);
        assert_eq!(node.get_array_item(1).unwrap().text, "b");
        assert!(node.get_array_item(2).is_none());
        assert!(!node.is_string_tagged());
    }

    #[test]
    fn test_lookup_last_occurrence_wins() {
        let node = YamlNode::new_hash(
            SourceInfo::default(),
            vec![
                YamlHashEntry::new(scalar("name"), scalar_at("a", 1)),
                YamlHashEntry::new(scalar("image"), scalar_at("x", 2)),
                YamlHashEntry::new(scalar("name"), scalar_at("b", 3)),
            ],
        );
        let name = node.get_hash_value("name").unwrap();
        assert_eq!(name.text, "b");
        assert_eq!(name.line(), 3);
    }

    #[test]
    fn test_lookup_absent_and_non_mapping() {
        let node = YamlNode::new_hash(
            SourceInfo::default(),
            vec![YamlHashEntry::new(scalar("kind"), scalar("Pod"))],
        );
        assert!(node.get_hash_value("apiVersion").is_none());
        assert!(scalar("kind").get_hash_value("kind").is_none());

        let seq = YamlNode::new_array(SourceInfo::default(), vec![scalar("kind")]);
        assert!(seq.get_hash_value("kind").is_none());
    }

    #[test]
    fn test_non_scalar_keys_never_match() {
        let complex_key = YamlNode::new_array(SourceInfo::default(), vec![]);
        let node = YamlNode::new_hash(
            SourceInfo::default(),
            vec![YamlHashEntry::new(complex_key, scalar("v"))],
        );
        assert!(node.get_hash_value("").is_none());
    }

    #[test]
    fn test_relocated_keeps_children() {
        let original = YamlNode::new_array(SourceInfo::default(), vec![scalar("a")]);
        let copy = original.relocated(SourceInfo::new(None, 40, 7, 3, 0));
        assert_eq!(copy.line(), 7);
        assert_eq!(copy.len(), 1);
    }
}
