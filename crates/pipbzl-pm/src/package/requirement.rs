use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::util::normalize_extra;
use crate::{ImportError, Result};

lazy_static! {
    /// One clause of a version specifier, e.g. `>=1.0` or `==2.*`
    static ref VERSION_CLAUSE: &'static str = r"(?:~=|===|==|!=|<=|>=|<|>)\s*[A-Za-z0-9_.*+!-]+";

    /// `name [extras] (specifier | @ url) ; marker`
    static ref REQUIREMENT_RE: Regex = Regex::new(&format!(
        r"^\s*(?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(?:\[(?P<extras>[^\]\[]*)\])?\s*(?:\(\s*{spec}\s*\)|{spec}|@\s*[^\s;]+)?\s*(?:;\s*(?P<marker>.*?))?\s*$",
        spec = format!(r"{clause}(?:\s*,\s*{clause})*", clause = *VERSION_CLAUSE),
    )).unwrap();

    static ref EXTRA_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap();

    // Both `extra == "x"` and `"x" == extra`
    static ref EXTRA_MARKER_RE: Regex = Regex::new(
        r#"(?:\bextra\s*==\s*["']([^"']+)["'])|(?:["']([^"']+)["']\s*==\s*extra\b)"#
    ).unwrap();
}

/// A dependency on another package, optionally with extras requested on it.
///
/// Version specifiers are dropped on parse: any version present in the
/// universe satisfies a requirement on that name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    /// Package name as written
    pub name: String,
    /// Requested extras, in order of first appearance, without duplicates
    pub extras: Vec<String>,
}

/// A requirement together with the environment marker it was declared with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequirement {
    pub requirement: Requirement,
    pub marker: Option<String>,
}

impl ParsedRequirement {
    /// The extra this requirement is conditional on, taken from an
    /// `extra == "..."` clause of its marker.
    pub fn extra(&self) -> Option<String> {
        self.marker.as_deref().and_then(extra_from_marker)
    }
}

impl Requirement {
    /// Creates a requirement on `name` with the given extras
    pub fn new<I, S>(name: impl Into<String>, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requirement = Self {
            name: name.into(),
            extras: Vec::new(),
        };
        for extra in extras {
            requirement.add_extra(extra.into());
        }
        requirement
    }

    /// Creates a requirement on the base install of `name`
    pub fn base(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extras: Vec::new(),
        }
    }

    fn add_extra(&mut self, extra: String) {
        let key = normalize_extra(&extra);
        if !self.extras.iter().any(|e| normalize_extra(e) == key) {
            self.extras.push(extra);
        }
    }

    /// Parse a PEP 508 requirement string such as
    /// `requests[security,socks] (>=2.0) ; extra == "http"`.
    pub fn parse(input: &str) -> Result<ParsedRequirement> {
        let invalid = |reason: &str| ImportError::InvalidRequirement {
            requirement: input.to_string(),
            reason: reason.to_string(),
        };

        let caps = REQUIREMENT_RE
            .captures(input)
            .ok_or_else(|| invalid("expected a package name"))?;

        let name = caps["name"].to_string();
        let mut requirement = Requirement::base(name);

        if let Some(extras) = caps.name("extras") {
            for extra in extras.as_str().split(',').map(str::trim) {
                if extra.is_empty() {
                    continue;
                }
                if !EXTRA_NAME_RE.is_match(extra) {
                    return Err(invalid(&format!("invalid extra name '{}'", extra)));
                }
                requirement.add_extra(extra.to_string());
            }
        }

        let marker = caps
            .name("marker")
            .map(|m| m.as_str().trim().to_string())
            .filter(|m| !m.is_empty());

        Ok(ParsedRequirement { requirement, marker })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extras.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}[{}]", self.name, self.extras.join(","))
        }
    }
}

/// Extract the extra name from an environment marker, if it has one
pub fn extra_from_marker(marker: &str) -> Option<String> {
    EXTRA_MARKER_RE.captures(marker).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}
