//! Import downloaded Python wheels into a Bazel dependency graph.
//!
//! Wheels are read into [`PackageRecord`]s, indexed into a
//! [`PackageUniverse`], and the [`resolver`] decides which optional extras of
//! each package can be built from that universe. The [`render`] module turns
//! the result into a `requirements.bzl` file.

pub mod error;
pub mod naming;
pub mod package;
pub mod render;
pub mod repository;
pub mod resolver;
pub mod util;
pub mod wheel;

pub use error::{ImportError, Result};
pub use package::{PackageRecord, Requirement};
pub use render::{RenderConfig, RequirementsRenderer};
pub use repository::{discover_wheels, load_records, PackageUniverse};
pub use resolver::{resolve, ExtraVerdict, ExtrasResolver, SatisfiabilityMap, Unsatisfiable};
pub use wheel::{Wheel, WheelName};
