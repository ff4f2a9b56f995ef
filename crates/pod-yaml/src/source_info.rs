//! Source location information for YAML nodes.

use yaml_rust2::scanner::Marker;

/// Source location information for a YAML node.
///
/// Tracks where a node starts in the original text. Diagnostics only ever
/// print the line, but the offset and length are kept so that callers can
/// slice the source or point an editor at the exact node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Optional filename or source identifier
    pub file: Option<String>,

    /// Character offset from start of source (0-based)
    pub offset: usize,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, in characters)
    pub col: usize,

    /// Length in characters
    pub len: usize,
}

impl SourceInfo {
    /// Create a new SourceInfo with all fields specified.
    pub fn new(file: Option<String>, offset: usize, line: usize, col: usize, len: usize) -> Self {
        Self {
            file,
            offset,
            line,
            col,
            len,
        }
    }

    /// Create a SourceInfo from a yaml-rust2 marker.
    ///
    /// yaml-rust2 reports lines 1-based and columns 0-based.
    pub(crate) fn from_marker(marker: &Marker, len: usize) -> Self {
        Self {
            file: None,
            offset: marker.index(),
            line: marker.line(),
            col: marker.col() + 1,
            len,
        }
    }

    /// Set the filename for this source location.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl Default for SourceInfo {
    fn default() -> Self {
        Self {
            file: None,
            offset: 0,
            line: 1,
            col: 1,
            len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_info_creation() {
        let info = SourceInfo::new(Some("pod.yaml".into()), 10, 2, 5, 8);
        assert_eq!(info.file, Some("pod.yaml".into()));
        assert_eq!(info.line, 2);
        assert_eq!(info.col, 5);
        assert_eq!(info.offset, 10);
        assert_eq!(info.len, 8);
    }

    #[test]
    fn test_default_points_at_first_line() {
        let info = SourceInfo::default();
        assert_eq!(info.file, None);
        assert_eq!(info.line, 1);
        assert_eq!(info.col, 1);
        assert_eq!(info.len, 0);
    }
}
