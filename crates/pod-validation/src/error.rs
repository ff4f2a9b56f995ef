// Error types for manifest validation

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Structured validation error kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ValidationErrorKind {
    /// Field is missing, or present but blank
    Required { field: String },

    /// Field holds a value outside its fixed set
    UnsupportedValue { field: String, value: String },

    /// Field does not match its format pattern
    InvalidFormat { field: String, value: String },

    /// Numeric field written as a string
    MustBeInt { field: String },

    /// Port number outside 1..=65535
    OutOfRange { field: String },
}

impl ValidationErrorKind {
    pub fn required(field: &str) -> Self {
        ValidationErrorKind::Required {
            field: field.to_string(),
        }
    }

    pub fn unsupported_value(field: &str, value: &str) -> Self {
        ValidationErrorKind::UnsupportedValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_format(field: &str, value: &str) -> Self {
        ValidationErrorKind::InvalidFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn must_be_int(field: &str) -> Self {
        ValidationErrorKind::MustBeInt {
            field: field.to_string(),
        }
    }

    pub fn out_of_range(field: &str) -> Self {
        ValidationErrorKind::OutOfRange {
            field: field.to_string(),
        }
    }

    /// The manifest field this error is about
    pub fn field(&self) -> &str {
        match self {
            ValidationErrorKind::Required { field }
            | ValidationErrorKind::UnsupportedValue { field, .. }
            | ValidationErrorKind::InvalidFormat { field, .. }
            | ValidationErrorKind::MustBeInt { field }
            | ValidationErrorKind::OutOfRange { field } => field,
        }
    }

    /// Get the error code for this error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationErrorKind::Required { .. } => "P-1-10",
            ValidationErrorKind::MustBeInt { .. } => "P-1-11",
            ValidationErrorKind::UnsupportedValue { .. } => "P-1-12",
            ValidationErrorKind::InvalidFormat { .. } => "P-1-13",
            ValidationErrorKind::OutOfRange { .. } => "P-1-14",
        }
    }

    /// Format the human-readable message for this error kind
    pub fn message(&self) -> String {
        match self {
            ValidationErrorKind::Required { field } => format!("{} is required", field),
            ValidationErrorKind::UnsupportedValue { field, value } => {
                format!("{} has unsupported value '{}'", field, value)
            }
            ValidationErrorKind::InvalidFormat { field, value } => {
                format!("{} has invalid format '{}'", field, value)
            }
            ValidationErrorKind::MustBeInt { field } => format!("{} must be int", field),
            ValidationErrorKind::OutOfRange { field } => format!("{} value out of range", field),
        }
    }
}

/// A single rule violation.
///
/// `line` is `None` when the offending key is absent from the document, since
/// there is nothing to point at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    /// The structured error kind
    pub kind: ValidationErrorKind,
    /// 1-based source line of the offending value
    pub line: Option<usize>,
    /// Where in the document the error was raised (e.g. `spec.containers.[0].image`)
    pub instance_path: InstancePath,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} {}", line, self.kind.message()),
            None => write!(f, "{}", self.kind.message()),
        }
    }
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, line: Option<usize>, instance_path: InstancePath) -> Self {
        Self {
            kind,
            line,
            instance_path,
        }
    }

    /// Get the human-readable message for this error
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// Render the diagnostic line printed for `filename`.
    ///
    /// `pod.yaml: name is required` without a line,
    /// `pod.yaml:7 kind has unsupported value 'Deployment'` with one.
    pub fn render(&self, filename: &str) -> String {
        match self.line {
            Some(line) => format!("{}:{} {}", filename, line, self.kind.message()),
            None => format!("{}: {}", filename, self.kind.message()),
        }
    }
}

/// Instance path (e.g., ["spec", "containers", 0, "image"])
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "(root)")
        } else {
            for (i, segment) in self.segments.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{}", segment)?;
            }
            Ok(())
        }
    }
}

/// A segment in an instance path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_path_display() {
        let mut path = InstancePath::new();
        assert_eq!(path.to_string(), "(root)");

        path.push_key("spec");
        path.push_key("containers");
        path.push(PathSegment::Index(0));
        path.push_key("image");
        assert_eq!(path.to_string(), "spec.containers.[0].image");

        assert_eq!(path.pop(), Some(PathSegment::Key("image".into())));
        assert_eq!(path.to_string(), "spec.containers.[0]");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationErrorKind::required("apiVersion").message(),
            "apiVersion is required"
        );
        assert_eq!(
            ValidationErrorKind::unsupported_value("kind", "Deployment").message(),
            "kind has unsupported value 'Deployment'"
        );
        assert_eq!(
            ValidationErrorKind::invalid_format("memory", "128MB").message(),
            "memory has invalid format '128MB'"
        );
        assert_eq!(
            ValidationErrorKind::must_be_int("containerPort").message(),
            "containerPort must be int"
        );
        assert_eq!(
            ValidationErrorKind::out_of_range("port").message(),
            "port value out of range"
        );
    }

    #[test]
    fn test_render_with_and_without_line() {
        let missing = ValidationError::new(
            ValidationErrorKind::required("spec"),
            None,
            InstancePath::new(),
        );
        assert_eq!(missing.render("pod.yaml"), "pod.yaml: spec is required");

        let located = ValidationError::new(
            ValidationErrorKind::unsupported_value("kind", "Deployment"),
            Some(2),
            InstancePath::new(),
        );
        assert_eq!(
            located.render("pod.yaml"),
            "pod.yaml:2 kind has unsupported value 'Deployment'"
        );
    }

    #[test]
    fn test_error_codes_and_field() {
        let kind = ValidationErrorKind::out_of_range("containerPort");
        assert_eq!(kind.field(), "containerPort");
        assert_eq!(kind.error_code(), "P-1-14");
        assert_eq!(ValidationErrorKind::required("image").error_code(), "P-1-10");
    }

    #[test]
    fn test_kind_serializes_tagged() {
        let json = serde_json::to_value(ValidationErrorKind::must_be_int("cpu")).unwrap();
        assert_eq!(json["type"], "MustBeInt");
        assert_eq!(json["data"]["field"], "cpu");
    }
}
