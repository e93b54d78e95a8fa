//! The package universe: every record available for one resolution run.

mod discovery;

pub use discovery::{discover_wheels, load_records};

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::package::PackageRecord;
use crate::util::normalize_name;

/// Closed set of package records, keyed by normalized identity.
///
/// Built once from the complete set of archives. Iteration is in identity
/// order, independent of the order records were supplied in.
#[derive(Debug, Clone, Default)]
pub struct PackageUniverse {
    packages: BTreeMap<String, Arc<PackageRecord>>,
}

impl PackageUniverse {
    /// Index `records` by normalized identity. No dependency validation
    /// happens here; if two records share an identity the last one wins.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PackageRecord>,
    {
        let mut packages = BTreeMap::new();

        for record in records {
            let identity = record.identity();
            if let Some(previous) = packages.insert(identity.clone(), Arc::new(record)) {
                log::warn!(
                    "Duplicate package {} ({} replaced by a later archive)",
                    identity,
                    previous.basename
                );
            }
        }

        log::debug!("Package universe has {} packages", packages.len());

        Self { packages }
    }

    /// Look up a package by name; the name is normalized first
    pub fn get(&self, name: &str) -> Option<&Arc<PackageRecord>> {
        self.packages.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Records in identity order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<PackageRecord>)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<PackageRecord> for PackageUniverse {
    fn from_iter<T: IntoIterator<Item = PackageRecord>>(iter: T) -> Self {
        Self::build(iter)
    }
}
