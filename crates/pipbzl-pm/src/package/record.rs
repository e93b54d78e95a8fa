use indexmap::IndexMap;

use super::requirement::Requirement;
use crate::util::{normalize_extra, normalize_name};

/// Immutable view of one downloaded archive.
///
/// The record knows its name, the archive it came from, the requirements it
/// always needs and the requirements each of its extras adds on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Distribution name as declared by the archive
    pub name: String,
    /// Version string as declared by the archive
    pub version: String,
    /// File name of the archive, used only for output
    pub basename: String,
    /// Unconditional requirements
    pub base_dependencies: Vec<Requirement>,
    /// Requirements that apply only when the extra is selected, keyed by
    /// extra name in declaration order. Extras without requirements are
    /// present with an empty list.
    pub extra_dependencies: IndexMap<String, Vec<Requirement>>,
}

impl PackageRecord {
    /// Creates a record with no dependencies
    pub fn new(name: impl Into<String>, version: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            basename: basename.into(),
            base_dependencies: Vec::new(),
            extra_dependencies: IndexMap::new(),
        }
    }

    /// Normalized identity of this record
    pub fn identity(&self) -> String {
        normalize_name(&self.name)
    }

    /// Declares an extra with no requirements of its own.
    /// Declaring an existing extra again is a no-op.
    pub fn declare_extra(&mut self, extra: impl Into<String>) {
        let extra = extra.into();
        if self.find_extra(&extra).is_none() {
            self.extra_dependencies.insert(extra, Vec::new());
        }
    }

    /// Adds a requirement to `extra`, declaring the extra if needed
    pub fn add_extra_dependency(&mut self, extra: impl Into<String>, requirement: Requirement) {
        let extra = extra.into();
        let key = self
            .find_extra(&extra)
            .map(|(declared, _)| declared.to_string())
            .unwrap_or(extra);
        self.extra_dependencies.entry(key).or_default().push(requirement);
    }

    /// Extra names declared by this record, in declaration order
    pub fn declared_extras(&self) -> impl Iterator<Item = &str> {
        self.extra_dependencies.keys().map(String::as_str)
    }

    /// Requirements of `extra`. An extra that is not declared has none.
    pub fn dependencies_for(&self, extra: &str) -> &[Requirement] {
        self.find_extra(extra)
            .map(|(_, deps)| deps.as_slice())
            .unwrap_or(&[])
    }

    fn find_extra(&self, extra: &str) -> Option<(&str, &Vec<Requirement>)> {
        if let Some((name, deps)) = self.extra_dependencies.get_key_value(extra) {
            return Some((name.as_str(), deps));
        }
        let key = normalize_extra(extra);
        self.extra_dependencies
            .iter()
            .find(|(name, _)| normalize_extra(name) == key)
            .map(|(name, deps)| (name.as_str(), deps))
    }
}
