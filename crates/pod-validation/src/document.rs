// Top-level manifest rules: header fields, metadata, spec

use crate::container::validate_container;
use crate::context::ValidationContext;
use crate::error::{PathSegment, ValidationErrorKind};
use crate::patterns::{API_VERSION, KIND, OS_NAMES};
use pod_yaml::{NodeKind, YamlNode};

/// Validate a manifest root.
///
/// Diagnostics come out in a fixed order: missing top-level fields, the
/// metadata name, `spec.os`, `spec.containers`, and finally the values of
/// `apiVersion` and `kind`.
pub(crate) fn validate_document(root: &YamlNode, ctx: &mut ValidationContext) {
    let api_version = root.get_hash_value("apiVersion");
    let kind = root.get_hash_value("kind");
    let metadata = root.get_hash_value("metadata");
    let spec = root.get_hash_value("spec");

    for (field, node) in [
        ("apiVersion", api_version),
        ("kind", kind),
        ("metadata", metadata),
        ("spec", spec),
    ] {
        if node.is_none() {
            ctx.missing(field);
        }
    }

    if let Some(metadata) = metadata {
        ctx.with_key("metadata", |ctx| validate_metadata(metadata, ctx));
    }

    if let Some(spec) = spec {
        ctx.with_key("spec", |ctx| validate_spec(spec, ctx));
    }

    if let Some(node) = api_version {
        check_exact("apiVersion", node, API_VERSION, ctx);
    }
    if let Some(node) = kind {
        check_exact("kind", node, KIND, ctx);
    }
}

fn check_exact(field: &str, node: &YamlNode, expected: &str, ctx: &mut ValidationContext) {
    if node.trimmed_text() != expected {
        ctx.at(node, ValidationErrorKind::unsupported_value(field, &node.text));
    }
}

/// A present but non-mapping `metadata` has no name to find.
fn validate_metadata(metadata: &YamlNode, ctx: &mut ValidationContext) {
    let has_name = metadata
        .get_hash_value("name")
        .is_some_and(|name| !name.trimmed_text().is_empty());
    if !has_name {
        ctx.missing("name");
    }
}

fn validate_spec(spec: &YamlNode, ctx: &mut ValidationContext) {
    if let Some(os) = spec.get_hash_value("os") {
        validate_os(os, ctx);
    }

    let containers = spec
        .get_hash_value("containers")
        .and_then(YamlNode::as_array)
        .filter(|items| !items.is_empty());

    let Some(containers) = containers else {
        ctx.missing("containers");
        return;
    };

    tracing::debug!(count = containers.len(), "validating containers");
    ctx.with_key("containers", |ctx| {
        for (index, container) in containers.iter().enumerate() {
            if !container.is_hash() {
                continue;
            }
            ctx.with_instance_path(PathSegment::Index(index), |ctx| {
                validate_container(container, ctx)
            });
        }
    });
}

/// `os` is either a bare name or a mapping with a `name` key.
fn validate_os(os: &YamlNode, ctx: &mut ValidationContext) {
    match os.kind() {
        NodeKind::Scalar => {
            if !OS_NAMES.contains(&os.trimmed_text()) {
                ctx.at(os, ValidationErrorKind::unsupported_value("os", &os.text));
            }
        }
        NodeKind::Mapping => {
            match os
                .get_hash_value("name")
                .filter(|name| !name.trimmed_text().is_empty())
            {
                None => ctx.with_key("os", |ctx| ctx.missing("name")),
                // untrimmed on purpose: " linux" in a mapping is rejected
                Some(name) if !OS_NAMES.contains(&name.text.as_str()) => {
                    ctx.at(name, ValidationErrorKind::unsupported_value("os", &name.text));
                }
                Some(_) => {}
            }
        }
        NodeKind::Sequence => {}
    }
}
