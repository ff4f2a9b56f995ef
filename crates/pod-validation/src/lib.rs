//! Conformance checks for Pod manifests.
//!
//! The schema is fixed: `apiVersion: v1`, `kind: Pod`, a named `metadata`
//! block, and a `spec` with a non-empty `containers` sequence whose entries
//! carry a name, a registry image, optional ports and HTTP probes, and
//! resource quantities. Every violation is collected; nothing stops at the
//! first failure.
//!
//! ```rust
//! let root = pod_yaml::parse("apiVersion: v1\nkind: Deployment\n").unwrap().unwrap();
//! let report = pod_validation::validate(&root, "pod.yaml");
//! let lines: Vec<String> = report.lines().collect();
//! assert_eq!(lines, vec![
//!     "pod.yaml: metadata is required",
//!     "pod.yaml: spec is required",
//!     "pod.yaml:2 kind has unsupported value 'Deployment'",
//! ]);
//! assert_eq!(report.exit_code(), 1);
//! ```

mod container;
pub mod context;
mod document;
pub mod error;
pub mod patterns;
pub mod report;

pub use context::ValidationContext;
pub use error::{InstancePath, PathSegment, ValidationError, ValidationErrorKind};
pub use report::ValidationReport;

use pod_yaml::YamlNode;

/// Validate a parsed manifest, labelling diagnostics with `filename`.
pub fn validate(root: &YamlNode, filename: &str) -> ValidationReport {
    let mut context = ValidationContext::new();
    document::validate_document(root, &mut context);
    tracing::debug!(
        file = filename,
        errors = context.error_count(),
        "validation finished"
    );
    ValidationReport::new(filename, context.into_errors())
}

/// Parse and validate manifest text in one step.
///
/// A document without content yields an empty, valid report.
///
/// # Errors
///
/// Returns the parse error if `content` is not well-formed YAML.
pub fn validate_str(content: &str, filename: &str) -> pod_yaml::Result<ValidationReport> {
    Ok(match pod_yaml::parse_file(content, filename)? {
        Some(root) => validate(&root, filename),
        None => ValidationReport::empty(filename),
    })
}
