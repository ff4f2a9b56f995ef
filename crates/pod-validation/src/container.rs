// Per-container rules: name, image, ports, probes, resources

use crate::context::ValidationContext;
use crate::error::{PathSegment, ValidationErrorKind};
use crate::patterns::{CONTAINER_NAME, IMAGE_REFERENCE, MEMORY_QUANTITY, PORT_RANGE, PROTOCOLS};
use pod_yaml::YamlNode;
use regex::Regex;

const PROBES: [&str; 2] = ["readinessProbe", "livenessProbe"];

/// Validate one entry of `spec.containers`.
pub(crate) fn validate_container(container: &YamlNode, ctx: &mut ValidationContext) {
    let name = container.get_hash_value("name");
    tracing::debug!(
        name = name.map_or("", |n| n.text.as_str()),
        line = container.line(),
        "validating container"
    );

    check_required_format("name", name, &CONTAINER_NAME, ctx);
    check_required_format("image", container.get_hash_value("image"), &IMAGE_REFERENCE, ctx);

    if let Some(ports) = container.get_hash_value("ports").and_then(YamlNode::as_array) {
        ctx.with_key("ports", |ctx| {
            for (index, port) in ports.iter().enumerate() {
                if port.is_hash() {
                    ctx.with_instance_path(PathSegment::Index(index), |ctx| {
                        validate_port(port, ctx)
                    });
                }
            }
        });
    }

    for probe in PROBES {
        if let Some(node) = container.get_hash_value(probe) {
            ctx.with_key(probe, |ctx| validate_probe(node, ctx));
        }
    }

    match container.get_hash_value("resources") {
        Some(resources) => ctx.with_key("resources", |ctx| validate_resources(resources, ctx)),
        None => ctx.missing("resources"),
    }
}

/// Non-blank presence, then a pattern match on the untrimmed text.
fn check_required_format(
    field: &str,
    node: Option<&YamlNode>,
    pattern: &Regex,
    ctx: &mut ValidationContext,
) {
    match node.filter(|n| !n.trimmed_text().is_empty()) {
        None => ctx.missing(field),
        Some(node) if !pattern.is_match(&node.text) => {
            ctx.at(node, ValidationErrorKind::invalid_format(field, &node.text));
        }
        Some(_) => {}
    }
}

/// Integer port check shared by `containerPort` and probe `port`.
///
/// A string tag is reported as a type error and nothing else. Anything else is
/// read as a decimal integer, with unreadable text counting as 0.
fn check_port_number(field: &str, node: &YamlNode, ctx: &mut ValidationContext) {
    if node.is_string_tagged() {
        ctx.at(node, ValidationErrorKind::must_be_int(field));
        return;
    }
    let value = node.trimmed_text().parse::<i64>().unwrap_or(0);
    if !PORT_RANGE.contains(&value) {
        ctx.at(node, ValidationErrorKind::out_of_range(field));
    }
}

fn validate_port(port: &YamlNode, ctx: &mut ValidationContext) {
    match port.get_hash_value("containerPort") {
        Some(number) => check_port_number("containerPort", number, ctx),
        None => ctx.missing("containerPort"),
    }

    if let Some(protocol) = port.get_hash_value("protocol") {
        let value = protocol.trimmed_text();
        if !value.is_empty() && !PROTOCOLS.contains(&value) {
            ctx.at(
                protocol,
                ValidationErrorKind::unsupported_value("protocol", &protocol.text),
            );
        }
    }
}

/// Shared by readiness and liveness probes; a non-mapping probe is ignored.
fn validate_probe(probe: &YamlNode, ctx: &mut ValidationContext) {
    if !probe.is_hash() {
        return;
    }

    let Some(http_get) = probe.get_hash_value("httpGet") else {
        ctx.missing("httpGet");
        return;
    };
    if !http_get.is_hash() {
        return;
    }

    ctx.with_key("httpGet", |ctx| {
        match http_get.get_hash_value("path") {
            None => ctx.missing("path"),
            Some(path) if !path.trimmed_text().starts_with('/') => {
                ctx.at(path, ValidationErrorKind::invalid_format("path", &path.text));
            }
            Some(_) => {}
        }

        match http_get.get_hash_value("port") {
            Some(port) => check_port_number("port", port, ctx),
            None => ctx.missing("port"),
        }
    });
}

/// Every mapping-valued entry (`limits`, `requests`, ...) is checked alike.
fn validate_resources(resources: &YamlNode, ctx: &mut ValidationContext) {
    let Some(entries) = resources.as_hash() else {
        return;
    };

    for entry in entries.iter().filter(|e| e.value.is_hash()) {
        ctx.with_key(&entry.key.text, |ctx| {
            validate_quantities(&entry.value, ctx)
        });
    }
}

fn validate_quantities(quantities: &YamlNode, ctx: &mut ValidationContext) {
    if let Some(cpu) = quantities.get_hash_value("cpu")
        && cpu.is_string_tagged()
    {
        ctx.at(cpu, ValidationErrorKind::must_be_int("cpu"));
    }

    if let Some(memory) = quantities.get_hash_value("memory")
        && !(memory.is_string_tagged() && MEMORY_QUANTITY.is_match(memory.trimmed_text()))
    {
        ctx.at(memory, ValidationErrorKind::invalid_format("memory", &memory.text));
    }
}
