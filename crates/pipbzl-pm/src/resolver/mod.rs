//! Extras satisfiability.
//!
//! Decides, for every package in a [`PackageUniverse`], which of its declared
//! extras can be built entirely from packages in that universe. An extra is
//! possible when every requirement it adds names a package that is present,
//! and every extra requested on those requirements is itself possible.
//!
//! The base install of a present package is always considered possible; its
//! own base requirements are not walked.

use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::package::Requirement;
use crate::repository::PackageUniverse;
use crate::util::{normalize_extra, normalize_name};

/// A package, or one extra of a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Node {
    identity: String,
    extra: Option<String>,
}

impl Node {
    fn new(name: &str, extra: Option<&str>) -> Self {
        Self {
            identity: normalize_name(name),
            extra: extra.map(normalize_extra),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(extra) => write!(f, "{}[{}]", self.identity, extra),
            None => write!(f, "{}", self.identity),
        }
    }
}

/// Why an extra cannot be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsatisfiable {
    /// A required package is not in the universe
    MissingPackage { name: String },
    /// The extra can only be justified by assuming itself. `path` starts and
    /// ends with the re-entered node.
    Cycle { path: Vec<String> },
}

impl fmt::Display for Unsatisfiable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsatisfiable::MissingPackage { name } => write!(f, "missing package {}", name),
            Unsatisfiable::Cycle { path } => write!(f, "cyclic requirement {}", path.join(" -> ")),
        }
    }
}

/// Satisfiable extras per package identity, in each package's declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SatisfiabilityMap {
    extras: BTreeMap<String, Vec<String>>,
}

impl SatisfiabilityMap {
    /// Satisfiable extras of `name`; empty for unknown packages
    pub fn extras_for(&self, name: &str) -> &[String] {
        self.extras
            .get(&normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_satisfiable(&self, name: &str, extra: &str) -> bool {
        let extra = normalize_extra(extra);
        self.extras_for(name).iter().any(|e| normalize_extra(e) == extra)
    }

    /// Entries in identity order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.extras.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.extras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extras.is_empty()
    }
}

/// Verdict for one declared extra
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraVerdict {
    pub extra: String,
    pub verdict: Result<(), Unsatisfiable>,
}

/// Evaluates extras against one universe.
///
/// Verdicts are memoized for the lifetime of the resolver only. A node's
/// verdict does not depend on the path it was reached from: anything that
/// can reach a cycle fails from every entry point.
pub struct ExtrasResolver<'a> {
    universe: &'a PackageUniverse,
    cache: HashMap<Node, Result<(), Unsatisfiable>>,
}

impl<'a> ExtrasResolver<'a> {
    pub fn new(universe: &'a PackageUniverse) -> Self {
        Self {
            universe,
            cache: HashMap::new(),
        }
    }

    /// Whether `name` (with `extra`, if any) can be built from the universe
    pub fn is_possible(&mut self, name: &str, extra: Option<&str>) -> bool {
        self.explain(name, extra).is_ok()
    }

    /// Like [`is_possible`](Self::is_possible), reporting the first reason
    /// the package or extra cannot be built
    pub fn explain(&mut self, name: &str, extra: Option<&str>) -> Result<(), Unsatisfiable> {
        let mut active = IndexSet::new();
        self.check(Node::new(name, extra), &mut active)
    }

    /// Satisfiable extras for every package in the universe
    pub fn resolve(&mut self) -> SatisfiabilityMap {
        let extras = self
            .report()
            .into_iter()
            .map(|(identity, verdicts)| {
                let possible = verdicts
                    .into_iter()
                    .filter(|v| v.verdict.is_ok())
                    .map(|v| v.extra)
                    .collect();
                (identity, possible)
            })
            .collect();

        SatisfiabilityMap { extras }
    }

    /// Verdict for every declared extra of every package, in identity order
    pub fn report(&mut self) -> BTreeMap<String, Vec<ExtraVerdict>> {
        let universe = self.universe;
        let mut report = BTreeMap::new();

        for (identity, record) in universe.iter() {
            let verdicts = record
                .declared_extras()
                .map(|extra| {
                    let verdict = self.explain(identity, Some(extra));
                    log::trace!("{}[{}]: {:?}", identity, extra, verdict);
                    ExtraVerdict {
                        extra: extra.to_string(),
                        verdict,
                    }
                })
                .collect();
            report.insert(identity.to_string(), verdicts);
        }

        report
    }

    fn check(&mut self, node: Node, active: &mut IndexSet<Node>) -> Result<(), Unsatisfiable> {
        let universe = self.universe;

        let Some(record) = universe.get(&node.identity) else {
            return Err(Unsatisfiable::MissingPackage {
                name: node.identity,
            });
        };

        let Some(extra) = node.extra.as_deref() else {
            return Ok(());
        };

        if let Some(verdict) = self.cache.get(&node) {
            return verdict.clone();
        }

        if let Some(start) = active.get_index_of(&node) {
            let path: Vec<String> = active
                .iter()
                .skip(start)
                .chain(std::iter::once(&node))
                .map(Node::to_string)
                .collect();
            log::debug!("Cycle in extra requirements: {}", path.join(" -> "));
            return Err(Unsatisfiable::Cycle { path });
        }

        active.insert(node.clone());
        let verdict = self.check_requirements(record.dependencies_for(extra), active);
        active.pop();

        self.cache.insert(node, verdict.clone());
        verdict
    }

    fn check_requirements(
        &mut self,
        requirements: &[Requirement],
        active: &mut IndexSet<Node>,
    ) -> Result<(), Unsatisfiable> {
        for requirement in requirements {
            self.check(Node::new(&requirement.name, None), active)?;
            for extra in &requirement.extras {
                self.check(Node::new(&requirement.name, Some(extra)), active)?;
            }
        }
        Ok(())
    }
}

/// Compute the satisfiable extras of every package in `universe`
pub fn resolve(universe: &PackageUniverse) -> SatisfiabilityMap {
    ExtrasResolver::new(universe).resolve()
}

/// Whether `name` (with `extra`, if any) can be built from `universe`
pub fn is_possible(universe: &PackageUniverse, name: &str, extra: Option<&str>) -> bool {
    ExtrasResolver::new(universe).is_possible(name, extra)
}
