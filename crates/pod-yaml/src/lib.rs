//! # pod-yaml
//!
//! YAML parsing with source location tracking.
//!
//! This crate turns YAML text into a [`YamlNode`] tree where every scalar,
//! mapping and sequence remembers the line it came from and, for scalars,
//! the type tag a YAML 1.2 core-schema loader would assign it. The tag is
//! what lets a validator tell `port: 8080` apart from `port: "8080"`.
//!
//! ## Design
//!
//! The tree is built from `yaml-rust2`'s marked event stream rather than from
//! its `Yaml` values, because `Yaml` discards both line numbers and quoting
//! style. Each node exclusively owns its children; the tree is built once and
//! never mutated afterwards.
//!
//! ## Example
//!
//! ```rust
//! use pod_yaml::{parse, ScalarTag};
//!
//! let root = parse("kind: Pod\nport: \"8080\"\n").unwrap().unwrap();
//! let kind = root.get_hash_value("kind").unwrap();
//! assert_eq!(kind.text, "Pod");
//! assert_eq!(kind.line(), 1);
//!
//! let port = root.get_hash_value("port").unwrap();
//! assert_eq!(port.tag, ScalarTag::Str);
//! ```

mod error;
mod node;
mod parser;
mod source_info;

pub use error::{Error, Result};
pub use node::{NodeKind, ScalarTag, YamlHashEntry, YamlNode};
pub use parser::{parse, parse_file};
pub use source_info::SourceInfo;
