//! Fixed values and format patterns of the Pod schema.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

pub const API_VERSION: &str = "v1";
pub const KIND: &str = "Pod";
pub const OS_NAMES: [&str; 2] = ["linux", "windows"];
pub const PROTOCOLS: [&str; 2] = ["TCP", "UDP"];
pub const PORT_RANGE: RangeInclusive<i64> = 1..=65535;

/// Lowercase alphanumeric tokens joined by single underscores.
pub static CONTAINER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap());

/// Image on the fixed registry with a path and a tag.
pub static IMAGE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^registry\.bigbrother\.io/[A-Za-z0-9._/-]+:[A-Za-z0-9._-]+$").unwrap()
});

/// Integer magnitude with a binary unit suffix.
pub static MEMORY_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:Ki|Mi|Gi)$").unwrap());
