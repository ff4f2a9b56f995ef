//! YAML parser that builds YamlNode trees.

use crate::{Error, Result, ScalarTag, SourceInfo, YamlHashEntry, YamlNode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Handle that `!!` expands to.
const CORE_TAG_HANDLE: &str = "tag:yaml.org,2002:";

/// Plain scalars loaded as `!!timestamp`: a date, optionally followed by a time.
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt][0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}(?:\.[0-9]+)?(?:Z|[-+][0-9]{2}:[0-9]{2})| [0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}(?:\.[0-9]+)?)?$",
    )
    .unwrap()
});

/// Parse YAML from a string, producing a YamlNode tree.
///
/// Only the first document of the stream is read. `Ok(None)` means the stream
/// held no document at all, e.g. an empty file or a file with only comments.
///
/// # Example
///
/// ```rust
/// use pod_yaml::parse;
///
/// let root = parse("kind: Pod").unwrap().unwrap();
/// assert!(root.is_hash());
/// assert!(parse("# nothing here\n").unwrap().is_none());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is not well formed.
pub fn parse(content: &str) -> Result<Option<YamlNode>> {
    parse_impl(content, None)
}

/// Parse YAML from a string with an associated filename.
///
/// The filename is recorded in the source information of every node.
///
/// ```rust
/// use pod_yaml::parse_file;
///
/// let root = parse_file("kind: Pod", "pod.yaml").unwrap().unwrap();
/// assert_eq!(root.source_info.file, Some("pod.yaml".into()));
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is not well formed.
pub fn parse_file(content: &str, filename: &str) -> Result<Option<YamlNode>> {
    parse_impl(content, Some(filename))
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<Option<YamlNode>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parser = Parser::new_from_str(content);
    let mut builder = YamlBuilder::new(content, filename);

    parser.load(&mut builder, false)?; // single document only

    let root = builder.result()?;
    tracing::trace!(
        file = filename.unwrap_or("<input>"),
        empty = root.is_none(),
        "parsed yaml document"
    );
    Ok(root)
}

/// Builder that implements MarkedEventReceiver to construct YamlNode trees.
struct YamlBuilder {
    /// Source characters; yaml-rust2 markers index characters, not bytes
    source: Vec<char>,

    filename: Option<String>,

    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    /// Completed anchored nodes by anchor id
    anchors: HashMap<usize, YamlNode>,

    /// The completed root node
    root: Option<YamlNode>,

    /// First structural error; events cannot fail, so it is reported at the end
    error: Option<Error>,
}

/// A collection being constructed during parsing.
enum BuildNode {
    Sequence {
        start_marker: Marker,
        anchor_id: usize,
        items: Vec<YamlNode>,
    },

    Mapping {
        start_marker: Marker,
        anchor_id: usize,
        entries: Vec<(YamlNode, Option<YamlNode>)>,
    },
}

impl YamlBuilder {
    fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            source: source.chars().collect(),
            filename: filename.map(|s| s.to_string()),
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            error: None,
        }
    }

    fn result(self) -> Result<Option<YamlNode>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.root),
        }
    }

    fn push_complete(&mut self, node: YamlNode) {
        let Some(parent) = self.stack.last_mut() else {
            self.root = Some(node);
            return;
        };

        match parent {
            BuildNode::Sequence { items, .. } => items.push(node),
            BuildNode::Mapping { entries, .. } => match entries.last_mut() {
                Some((_, value @ None)) => *value = Some(node),
                _ => entries.push((node, None)),
            },
        }
    }

    fn register_anchor(&mut self, anchor_id: usize, node: &YamlNode) {
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, node.clone());
        }
    }

    fn make_source_info(&self, marker: &Marker, len: usize) -> SourceInfo {
        let info = SourceInfo::from_marker(marker, len);
        match &self.filename {
            Some(filename) => info.with_file(filename.clone()),
            None => info,
        }
    }

    /// yaml-rust2 reports a missing value (`key:` followed by nothing) as a
    /// plain `~` positioned at the next token; a real `~` sits under its marker.
    fn is_implicit_null(&self, value: &str, style: TScalarStyle, marker: &Marker) -> bool {
        value == "~"
            && matches!(style, TScalarStyle::Plain)
            && self.source.get(marker.index()) != Some(&'~')
    }

    fn on_scalar(
        &mut self,
        value: String,
        style: TScalarStyle,
        anchor_id: usize,
        explicit_tag: Option<ScalarTag>,
        marker: Marker,
    ) {
        let (text, tag) = if self.is_implicit_null(&value, style, &marker) {
            (String::new(), ScalarTag::Null)
        } else {
            let tag = explicit_tag.unwrap_or_else(|| match style {
                TScalarStyle::Plain => resolve_plain(&value),
                _ => ScalarTag::Str,
            });
            (value, tag)
        };

        let source_info = self.make_source_info(&marker, text.chars().count());
        let node = YamlNode::new_scalar(text, tag, source_info);
        self.register_anchor(anchor_id, &node);
        self.push_complete(node);
    }

    fn on_alias(&mut self, anchor_id: usize, marker: Marker) {
        let source_info = self.make_source_info(&marker, 0);
        match self.anchors.get(&anchor_id) {
            Some(target) => {
                let node = target.relocated(source_info);
                self.push_complete(node);
            }
            None => {
                if self.error.is_none() {
                    self.error = Some(Error::RecursiveAlias {
                        line: source_info.line,
                    });
                }
                // keep mapping key/value pairing intact
                self.push_complete(YamlNode::new_scalar("", ScalarTag::Null, source_info));
            }
        }
    }

    fn on_sequence_end(&mut self, marker: Marker) {
        let Some(BuildNode::Sequence {
            start_marker,
            anchor_id,
            items,
        }) = self.stack.pop()
        else {
            return;
        };

        let len = marker.index().saturating_sub(start_marker.index());
        let source_info = self.make_source_info(&start_marker, len);
        let node = YamlNode::new_array(source_info, items);
        self.register_anchor(anchor_id, &node);
        self.push_complete(node);
    }

    fn on_mapping_end(&mut self, marker: Marker) {
        let Some(BuildNode::Mapping {
            start_marker,
            anchor_id,
            entries,
        }) = self.stack.pop()
        else {
            return;
        };

        let len = marker.index().saturating_sub(start_marker.index());
        let source_info = self.make_source_info(&start_marker, len);
        let entries = entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| YamlHashEntry::new(key, value)))
            .collect();
        let node = YamlNode::new_hash(source_info, entries);
        self.register_anchor(anchor_id, &node);
        self.push_complete(node);
    }
}

impl MarkedEventReceiver for YamlBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(value, style, anchor_id, tag) => {
                let explicit_tag = tag.as_ref().map(|t| {
                    if t.handle == CORE_TAG_HANDLE || t.handle == "!!" {
                        ScalarTag::from_core_suffix(&t.suffix).unwrap_or(ScalarTag::Other)
                    } else if t.suffix.is_empty() || t.suffix == "!" {
                        // non-specific `!`
                        ScalarTag::Str
                    } else {
                        ScalarTag::Other
                    }
                });
                self.on_scalar(value, style, anchor_id, explicit_tag, marker);
            }

            Event::SequenceStart(anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start_marker: marker,
                    anchor_id,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => self.on_sequence_end(marker),

            Event::MappingStart(anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start_marker: marker,
                    anchor_id,
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => self.on_mapping_end(marker),

            Event::Alias(anchor_id) => self.on_alias(anchor_id, marker),

            // stream and document boundaries carry no nodes
            _ => {}
        }
    }
}

/// Resolve the tag of a plain scalar using the YAML 1.2 core schema.
///
/// Numbers may carry `_` separators (`8_080` is an int) and dates resolve to
/// `Timestamp`, as common loaders do. Only scalars starting with a digit, a
/// sign or `.` are candidates for anything but null, bool and str.
fn resolve_plain(value: &str) -> ScalarTag {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => ScalarTag::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => ScalarTag::Bool,
        _ if !value.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) => {
            ScalarTag::Str
        }
        _ if TIMESTAMP.is_match(value) => ScalarTag::Timestamp,
        _ => {
            let plain = value.replace('_', "");
            if is_core_int(&plain) {
                ScalarTag::Int
            } else if is_core_float(&plain) {
                ScalarTag::Float
            } else {
                ScalarTag::Str
            }
        }
    }
}

fn all_digits(s: &str, radix: u32) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
}

fn is_core_int(value: &str) -> bool {
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    if let Some(hex) = unsigned.strip_prefix("0x") {
        all_digits(hex, 16)
    } else if let Some(octal) = unsigned.strip_prefix("0o") {
        all_digits(octal, 8)
    } else if let Some(binary) = unsigned.strip_prefix("0b") {
        all_digits(binary, 2)
    } else {
        all_digits(unsigned, 10)
    }
}

fn is_core_float(value: &str) -> bool {
    if matches!(value, ".nan" | ".NaN" | ".NAN") {
        return true;
    }
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    if matches!(unsigned, ".inf" | ".Inf" | ".INF") {
        return true;
    }

    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some(("", fraction)) => all_digits(fraction, 10),
        Some((whole, fraction)) => {
            all_digits(whole, 10) && fraction.chars().all(|c| c.is_ascii_digit())
        }
        None => all_digits(mantissa, 10),
    };

    let exponent_ok = match exponent {
        Some(exp) => all_digits(exp.strip_prefix(['-', '+']).unwrap_or(exp), 10),
        None => true,
    };

    mantissa_ok && exponent_ok
}
