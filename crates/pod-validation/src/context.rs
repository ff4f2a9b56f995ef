// Diagnostic collection during a validation run

use crate::error::{InstancePath, PathSegment, ValidationError, ValidationErrorKind};
use pod_yaml::YamlNode;

/// Validation context tracks state during validation.
///
/// Errors are append-only: every failed check adds exactly one error and
/// validation always continues with the next check.
#[derive(Debug, Default)]
pub struct ValidationContext {
    /// Current instance path (e.g., ["spec", "containers", 0])
    instance_path: InstancePath,
    /// Collected validation errors, in the order they were found
    errors: Vec<ValidationError>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error located at `node`, or unlocated when `node` is `None`.
    ///
    /// The recorded path is the current path extended by the field the error
    /// is about.
    pub fn add_error(&mut self, kind: ValidationErrorKind, node: Option<&YamlNode>) {
        let mut path = self.instance_path.clone();
        path.push_key(kind.field());
        let line = node.map(YamlNode::line);
        tracing::trace!(path = %path, ?line, "{}", kind.message());
        self.errors.push(ValidationError::new(kind, line, path));
    }

    /// Report a field that is missing from its parent mapping.
    pub fn missing(&mut self, field: &str) {
        self.add_error(ValidationErrorKind::required(field), None);
    }

    /// Report a violation located at `node`.
    pub fn at(&mut self, node: &YamlNode, kind: ValidationErrorKind) {
        self.add_error(kind, Some(node));
    }

    /// Execute a function with a new instance path segment
    pub fn with_instance_path<F, R>(&mut self, segment: PathSegment, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.instance_path.push(segment);
        let result = f(self);
        self.instance_path.pop();
        result
    }

    /// Shorthand for descending into a mapping key.
    pub fn with_key<F, R>(&mut self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.with_instance_path(PathSegment::Key(key.to_string()), f)
    }

    /// Get the collected errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
