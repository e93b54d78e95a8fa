//! Stable names for generated targets.
//!
//! Every package gets a requirement key and a Bazel label; every satisfiable
//! extra gets its own key and label. All names are pure functions of the
//! package and extra, so regenerating over the same wheels is byte-identical.

use crate::package::PackageRecord;
use crate::util::{escape_repository_part, normalize_name};

/// Separator between a package key and an extra name. It cannot occur in a
/// normalized identity.
pub const EXTRA_SEPARATOR: char = '[';

/// Target name of a package's base install
pub const BASE_TARGET: &str = "pkg";

/// Requirement key of a package's base install, e.g. `google_cloud_core`
pub fn requirement_key(name: &str) -> String {
    normalize_name(name)
}

/// Requirement key of a package extra, e.g. `requests[security]`
pub fn extra_requirement_key(name: &str, extra: &str) -> String {
    format!("{}{}{}]", normalize_name(name), EXTRA_SEPARATOR, extra.to_lowercase())
}

/// Name of the external repository holding a wheel:
/// `pypi__{distribution}_{version}` with `-`, `.` and `+` replaced by `_`
pub fn repository_name(record: &PackageRecord) -> String {
    escape_repository_part(&format!("pypi__{}_{}", record.identity(), record.version))
}

/// Label of a package's base target, e.g. `@pypi__six_1_12_0//:pkg`
pub fn package_label(record: &PackageRecord) -> String {
    format!("@{}//:{}", repository_name(record), BASE_TARGET)
}

/// Label of an extra's target, e.g. `@pypi__requests_2_22_0//:security`
pub fn extra_label(record: &PackageRecord, extra: &str) -> String {
    format!("@{}//:{}", repository_name(record), extra)
}
