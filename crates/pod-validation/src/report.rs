// Outcome of validating one manifest

use crate::error::ValidationError;
use serde_json::json;

/// All diagnostics produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    filename: String,
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(filename: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            filename: filename.into(),
            errors,
        }
    }

    /// Report for a document without content, which is trivially valid.
    pub fn empty(filename: impl Into<String>) -> Self {
        Self::new(filename, Vec::new())
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Process exit status: 1 when any diagnostic was produced, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.is_valid() { 0 } else { 1 }
    }

    /// One rendered diagnostic line per error, in discovery order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.errors.iter().map(|e| e.render(&self.filename))
    }

    /// Machine-readable form of the report.
    pub fn to_json(&self) -> serde_json::Value {
        let diagnostics: Vec<serde_json::Value> = self
            .errors
            .iter()
            .map(|e| {
                json!({
                    "code": e.error_code(),
                    "message": e.message(),
                    "line": e.line,
                    "path": e.instance_path.to_string(),
                })
            })
            .collect();

        json!({
            "file": self.filename,
            "errorCount": self.error_count(),
            "diagnostics": diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InstancePath, ValidationErrorKind};

    fn sample() -> ValidationReport {
        let mut path = InstancePath::new();
        path.push_key("kind");
        ValidationReport::new(
            "pod.yaml",
            vec![
                ValidationError::new(
                    ValidationErrorKind::required("spec"),
                    None,
                    InstancePath::new(),
                ),
                ValidationError::new(
                    ValidationErrorKind::unsupported_value("kind", "Deployment"),
                    Some(2),
                    path,
                ),
            ],
        )
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::empty("pod.yaml");
        assert!(report.is_valid());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.lines().count(), 0);
    }

    #[test]
    fn test_lines_and_exit_code() {
        let report = sample();
        assert_eq!(report.exit_code(), 1);
        let lines: Vec<String> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "pod.yaml: spec is required",
                "pod.yaml:2 kind has unsupported value 'Deployment'",
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json();
        assert_eq!(json["file"], "pod.yaml");
        assert_eq!(json["errorCount"], 2);
        assert_eq!(json["diagnostics"][0]["line"], serde_json::Value::Null);
        assert_eq!(json["diagnostics"][1]["code"], "P-1-12");
        assert_eq!(json["diagnostics"][1]["path"], "kind");
    }
}
