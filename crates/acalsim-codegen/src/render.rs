// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Placeholder substitution and file emission.
//!
//! Substitution is exact-text replacement of fixed markers. Anything
//! conditional (namespace wrappers, include lists, registration statements)
//! is computed by the caller into one string before it is substituted.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};
use crate::naming;
use crate::template::{TemplateId, TemplateSource};

/// Placeholder markers understood by the bundled templates.
pub mod markers {
    pub const DEFINE_MACRO: &str = "{{util.define_macro}}";
    pub const CLASS_NAME: &str = "{{util.class_name}}";
    pub const NAMESPACE_HEAD: &str = "\n{{util.namespace_name.head}}";
    pub const NAMESPACE_FOOTER: &str = "\n{{util.namespace_name.footer}}";
    pub const INC_SELF_PATH: &str = "{{util.inc_self_path}}";
    pub const INC_PATH: &str = "{{util.inc_path}}";
    pub const PROJECT_NAME: &str = "{{util.project_name}}";
    pub const APP_LIB_NAME: &str = "{{util.app_lib_name}}";
    pub const MASTER_PORTS: &str = "{{SimPort.SimPortManager.masterports}}";
    pub const SLAVE_PORTS: &str = "{{SimPort.SimPortManager.slaveports}}";
    pub const PORT_CONNECTIONS: &str = "{{SimPort.simport_connection}}";
    pub const CHANNEL_CONNECTIONS: &str = "{{SimChannel.channel_connection}}";
    pub const MODULE_INCLUDES: &str = "{{SimBase.SimBase.register_modules.include}}";
    pub const MODULE_REGISTRATION: &str = "{{SimBase.SimBase.register_modules.generate}}";
    pub const SIMULATOR_INCLUDES: &str = "{{SimTop.SimTop.register_simulators.include}}";
    pub const SIMULATOR_REGISTRATION: &str = "{{SimTop.SimTop.register_simulators.generate}}";
}

type Step<'a> = Box<dyn Fn(&str) -> String + 'a>;

/// Ordered list of text transforms. Each step sees the output of the
/// previous one.
#[derive(Default)]
pub struct TransformChain<'a> {
    steps: Vec<Step<'a>>,
}

impl<'a> TransformChain<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append an arbitrary step.
    #[must_use]
    pub fn then(mut self, step: impl Fn(&str) -> String + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Append a step replacing every occurrence of `marker` with `value`.
    #[must_use]
    pub fn replace(self, marker: &'a str, value: impl Into<String>) -> Self {
        let value = value.into();
        self.then(move |text| text.replace(marker, &value))
    }

    #[must_use]
    pub fn define_macro(self, destination: &str) -> Self {
        self.replace(markers::DEFINE_MACRO, naming::define_macro(destination))
    }

    #[must_use]
    pub fn class_name(self, name: &str) -> Self {
        self.replace(markers::CLASS_NAME, name)
    }

    /// Namespace wrappers; both markers vanish when `group` is empty.
    #[must_use]
    pub fn namespace(self, group: &str) -> Self {
        self.replace(markers::NAMESPACE_HEAD, naming::namespace_head(group))
            .replace(markers::NAMESPACE_FOOTER, naming::namespace_footer(group))
    }

    #[must_use]
    pub fn inc_self_path(self, path: &str) -> Self {
        self.replace(markers::INC_SELF_PATH, path)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in insertion order.
    pub fn apply(&self, text: &str) -> String {
        self.steps
            .iter()
            .fold(text.to_string(), |acc, step| step(&acc))
    }
}

impl fmt::Debug for TransformChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformChain")
            .field("steps", &self.steps.len())
            .finish()
    }
}

fn write_output(destination: &Path, content: &str) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
        }
    }
    std::fs::write(destination, content).map_err(|e| CodegenError::io(destination, e))
}

/// Files written by one generation run, in write order.
#[derive(Debug, Default, Clone)]
pub struct GenerationReport {
    pub files: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.iter().any(|f| f == path.as_ref())
    }

    pub fn summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("  ACALSim Code Generation Report");
        println!("{}", "=".repeat(60));
        println!();
        let headers = self.count_ext(naming::HEADER_EXT);
        let sources = self.count_ext(naming::SOURCE_EXT);
        println!("  [OK] Headers:        {} files", headers);
        println!("  [OK] Sources:        {} files", sources);
        println!(
            "  [OK] Build files:    {} files",
            self.files.len() - headers - sources
        );
        println!();
        for file in &self.files {
            println!("    - {}", file.display());
        }
        println!();
        println!("{}", "=".repeat(60));
    }

    fn count_ext(&self, ext: &str) -> usize {
        self.files
            .iter()
            .filter(|f| f.extension().is_some_and(|e| e == ext))
            .count()
    }
}

/// Resolves templates, applies transform chains and writes the results
/// below an output root.
pub struct Renderer<'t> {
    templates: &'t dyn TemplateSource,
    output_root: PathBuf,
    report: GenerationReport,
}

impl<'t> Renderer<'t> {
    pub fn new(templates: &'t dyn TemplateSource, output_root: impl Into<PathBuf>) -> Self {
        Self {
            templates,
            output_root: output_root.into(),
            report: GenerationReport::new(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Render template `id` to `destination`, a `/`-separated path relative
    /// to the output root. Returns the absolute path written.
    pub fn render(
        &mut self,
        id: TemplateId,
        destination: &str,
        chain: &TransformChain,
    ) -> Result<PathBuf> {
        let template = self.templates.load(id)?;
        let path = self.output_root.join(destination);
        // Written once, after every transform has run.
        write_output(&path, &chain.apply(&template))?;
        tracing::debug!("Wrote {} from {:?}", path.display(), id);
        self.report.files.push(path.clone());
        Ok(path)
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn into_report(self) -> GenerationReport {
        self.report
    }
}
