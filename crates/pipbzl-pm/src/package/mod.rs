// Package model for downloaded wheels
//
// A record carries a wheel's identity plus its base and per-extra
// requirements. Requirements are parsed once at the discovery boundary.

mod record;
mod requirement;

pub use record::PackageRecord;
pub use requirement::{extra_from_marker, ParsedRequirement, Requirement};
