//! `requirements.bzl` generation.

use std::path::Path;

use crate::naming::{extra_label, extra_requirement_key, package_label, repository_name, requirement_key};
use crate::repository::PackageUniverse;
use crate::resolver::SatisfiabilityMap;
use crate::Result;

/// Repository that provides the `whl_library` rule
pub const DEFAULT_RULES_REPOSITORY: &str = "@io_bazel_rules_python";

/// Settings for rendering a requirements file
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Namespace of the import; wheels are referenced as `@{name}//:{basename}`
    pub name: String,
    /// The requirements file the wheels were fetched from, for the header
    pub input: String,
    /// Repository providing `//python:whl.bzl`
    pub rules_repository: String,
}

impl RenderConfig {
    pub fn new(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            rules_repository: DEFAULT_RULES_REPOSITORY.to_string(),
        }
    }

    pub fn with_rules_repository(mut self, rules_repository: impl Into<String>) -> Self {
        self.rules_repository = rules_repository.into();
        self
    }
}

/// Renders the Starlark file declaring one `whl_library` per wheel and the
/// `requirement()` lookup over every base and extra target
pub struct RequirementsRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> RequirementsRenderer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Render the full file
    pub fn render(&self, universe: &PackageUniverse, extras: &SatisfiabilityMap) -> String {
        let mut content = String::new();

        content.push_str("# Install pip requirements.\n");
        content.push_str("#\n");
        content.push_str(&format!("# Generated from {}\n\n", self.config.input));
        content.push_str(&format!(
            "load(\"{}//python:whl.bzl\", \"whl_library\")\n\n",
            self.config.rules_repository
        ));

        content.push_str("def pip_install():\n");
        if universe.is_empty() {
            content.push_str("  pass\n");
        }
        for (identity, record) in universe.iter() {
            let repo = repository_name(record);
            let record_extras = extras
                .extras_for(identity)
                .iter()
                .map(|e| format!("\"{}\"", e))
                .collect::<Vec<_>>()
                .join(",");

            content.push_str(&format!("  if \"{}\" not in native.existing_rules():\n", repo));
            content.push_str("    whl_library(\n");
            content.push_str(&format!("        name = \"{}\",\n", repo));
            content.push_str(&format!("        whl = \"@{}//:{}\",\n", self.config.name, record.basename));
            content.push_str(&format!("        requirements = \"@{}//:requirements.bzl\",\n", self.config.name));
            content.push_str(&format!("        extras = [{}]\n", record_extras));
            content.push_str("    )\n");
        }
        content.push('\n');

        content.push_str("_requirements = {\n");
        for (identity, record) in universe.iter() {
            content.push_str(&format!(
                "  \"{}\": \"{}\",\n",
                requirement_key(identity),
                package_label(record)
            ));
            for extra in extras.extras_for(identity) {
                content.push_str(&format!(
                    "  \"{}\": \"{}\",\n",
                    extra_requirement_key(identity, extra),
                    extra_label(record, extra)
                ));
            }
        }
        content.push_str("}\n\n");

        content.push_str("all_requirements = _requirements.values()\n\n");
        // Only the package part is normalized; extra names keep their dashes
        content.push_str("def requirement(name):\n");
        content.push_str("  key = name.lower()\n");
        content.push_str("  bracket = key.find(\"[\")\n");
        content.push_str("  if bracket == -1:\n");
        content.push_str("    return _requirements[key.replace(\"-\", \"_\")]\n");
        content.push_str("  return _requirements[key[:bracket].replace(\"-\", \"_\") + key[bracket:]]\n");

        content
    }

    /// Render and write to `path`
    pub fn write(&self, path: &Path, universe: &PackageUniverse, extras: &SatisfiabilityMap) -> Result<()> {
        let content = self.render(universe, extras);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Wrote {} packages to {}", universe.len(), path.display());
        Ok(())
    }
}
