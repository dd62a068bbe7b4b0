// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generation driver.
//!
//! A [`Generator`] walks a component tree depth-first through the
//! [`Codegen`] trait, then emits the application entry point and, when a
//! project name is given, the project scaffolding.
//!
//! ```no_run
//! use acalsim_codegen::{Coordinator, Generator, Module, Simulator};
//!
//! let mut sim = Simulator::new("CPU");
//! sim.add_module(Module::new("IFStage"))?;
//! sim.add_module(Module::new("IDStage"))?;
//! sim.connect_port("IFStage", "IDStage", "to ID", "from IF")?;
//!
//! let mut top = Coordinator::new("SOCSimTop", "app_soc");
//! top.add_simulator(sim)?;
//!
//! let report = Generator::new("out").generate_top(&top, Some("Soc"))?;
//! report.summary();
//! # Ok::<(), acalsim_codegen::CodegenError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, GeneratorConfig};
use crate::coordinator::Coordinator;
use crate::error::{CodegenError, Result};
use crate::module::Module;
use crate::naming::{join_path, Identity};
use crate::render::{markers, GenerationReport, Renderer, TransformChain};
use crate::simulator::Simulator;
use crate::template::{DirTemplates, EmbeddedTemplates, TemplateId, TemplateSource};

/// Per-entity generation step. Children are generated before the entity's
/// own files.
pub trait Codegen {
    fn codegen(&self, renderer: &mut Renderer) -> Result<()>;
}

/// `#include` lines for a list of children, in order.
pub(crate) fn include_directives(children: &[&Identity]) -> String {
    children
        .iter()
        .map(|child| format!("#include \"{}\"", child.include_path(false)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Construction statements followed by registration calls, one of each per
/// child.
pub(crate) fn registration_statements(
    children: &[&Identity],
    suffix: &str,
    add_fn: &str,
) -> String {
    let construct = children
        .iter()
        .map(|child| {
            format!(
                "auto {name}_{suffix} = new {ty}(\"{name}\");",
                name = child.name(),
                ty = child.qualified_name(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\t");
    let register = children
        .iter()
        .map(|child| format!("this->{}({}_{});", add_fn, child.name(), suffix))
        .collect::<Vec<_>>()
        .join("\n\t");
    format!("{}\n\n\t{}", construct, register)
}

pub struct Generator {
    output_root: PathBuf,
    templates: Box<dyn TemplateSource>,
}

impl Generator {
    /// Generator writing below `output_root` with the embedded templates.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            templates: Box::new(EmbeddedTemplates),
        }
    }

    #[must_use]
    pub fn with_templates(mut self, templates: impl TemplateSource + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    /// Build a generator from a validated configuration.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let generator = Self::new(&config.output_dir);
        Ok(match &config.template_dir {
            Some(dir) => generator.with_templates(DirTemplates::new(dir)),
            None => generator,
        })
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Generate the whole tree, the application files and, when `project`
    /// is given, the project scaffolding.
    pub fn generate_top(
        &self,
        top: &Coordinator,
        project: Option<&str>,
    ) -> Result<GenerationReport> {
        tracing::info!(
            "Generating '{}' for app '{}' into {}",
            top.name(),
            top.app(),
            self.output_root.display()
        );
        check_project_name(project)?;
        let mut renderer = Renderer::new(&*self.templates, &self.output_root);
        top.codegen(&mut renderer)?;
        write_app_files(&mut renderer, top)?;
        self.finish(renderer, project)
    }

    /// Generate one simulator and its modules. No application files are
    /// written.
    pub fn generate_simulator(
        &self,
        sim: &Simulator,
        project: Option<&str>,
    ) -> Result<GenerationReport> {
        tracing::info!("Generating simulator '{}'", sim.name());
        check_project_name(project)?;
        let mut renderer = Renderer::new(&*self.templates, &self.output_root);
        sim.codegen(&mut renderer)?;
        self.finish(renderer, project)
    }

    /// Generate a single module.
    pub fn generate_module(
        &self,
        module: &Module,
        project: Option<&str>,
    ) -> Result<GenerationReport> {
        tracing::info!("Generating module '{}'", module.name());
        check_project_name(project)?;
        let mut renderer = Renderer::new(&*self.templates, &self.output_root);
        module.codegen(&mut renderer)?;
        self.finish(renderer, project)
    }

    fn finish(&self, mut renderer: Renderer, project: Option<&str>) -> Result<GenerationReport> {
        if let Some(project) = project {
            write_project_files(&mut renderer, project)?;
        }
        let report = renderer.into_report();
        tracing::info!("Generation complete: {} files written", report.len());
        Ok(report)
    }
}

fn write_app_files(renderer: &mut Renderer, top: &Coordinator) -> Result<()> {
    let app = top.app();
    let backend = top.backend();
    let identity = top.identity();

    let chain = TransformChain::new()
        .replace(markers::INC_PATH, identity.include_path(false))
        .class_name(&identity.qualified_name());
    renderer.render(TemplateId::Main(backend), &join_path(&["src", app, "main.cc"]), &chain)?;

    let chain = TransformChain::new().replace(markers::APP_LIB_NAME, app);
    renderer.render(
        TemplateId::AppBuild,
        &join_path(&["src", app, "CMakeLists.txt"]),
        &chain,
    )?;
    renderer.render(
        TemplateId::AppLibsBuild,
        &join_path(&["src", app, "libs", "CMakeLists.txt"]),
        &chain,
    )?;
    Ok(())
}

/// Rejected before anything is written.
fn check_project_name(project: Option<&str>) -> Result<()> {
    match project {
        Some(name) if name.trim().is_empty() => Err(CodegenError::Config(ConfigError::Invalid(
            "project name must not be empty".into(),
        ))),
        _ => Ok(()),
    }
}

fn write_project_files(renderer: &mut Renderer, project: &str) -> Result<()> {
    tracing::info!("Writing project scaffolding for '{}'", project);

    let chain = TransformChain::new().replace(markers::PROJECT_NAME, project);
    renderer.render(TemplateId::ProjectBuild, "CMakeLists.txt", &chain)?;
    renderer.render(
        TemplateId::ProjectLibsBuild,
        "libs/CMakeLists.txt",
        &TransformChain::new(),
    )?;

    let header = join_path(&["include", &format!("{}.hh", project)]);
    renderer.render(
        TemplateId::ProjectHeader,
        &header,
        &TransformChain::new().define_macro(&header),
    )?;
    renderer.render(
        TemplateId::ProjectSource,
        &join_path(&["libs", &format!("{}.cc", project)]),
        &TransformChain::new().inc_self_path(&format!("{}.hh", project)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn identities(names: &[(&str, &str)]) -> Vec<Identity> {
        names
            .iter()
            .map(|(name, group)| {
                let mut id = Identity::new(*name);
                id.group = group.to_string();
                id
            })
            .collect()
    }

    #[test]
    fn test_include_directives() {
        let ids = identities(&[("A", ""), ("B", "g")]);
        let refs: Vec<&Identity> = ids.iter().collect();
        assert_eq!(
            include_directives(&refs),
            "#include \"A.hh\"\n#include \"g/B.hh\""
        );
    }

    #[test]
    fn test_registration_statements() {
        let ids = identities(&[("A", ""), ("B", "g")]);
        let refs: Vec<&Identity> = ids.iter().collect();
        assert_eq!(
            registration_statements(&refs, "mod", "addModule"),
            "auto A_mod = new A(\"A\");\n\tauto B_mod = new g::B(\"B\");\n\n\t\
             this->addModule(A_mod);\n\tthis->addModule(B_mod);"
        );
    }

    #[test]
    fn test_generate_module_without_project() {
        let dir = TempDir::new().unwrap();
        let module = Module::new("Cache").shared(true);
        let report = Generator::new(dir.path())
            .generate_module(&module, None)
            .unwrap();
        assert_eq!(report.len(), 2);
        assert!(report.contains(dir.path().join("include/Cache.hh")));
        assert!(report.contains(dir.path().join("libs/Cache.cc")));
    }

    #[test]
    fn test_project_scaffolding() {
        let dir = TempDir::new().unwrap();
        let module = Module::new("Cache").shared(true);
        let report = Generator::new(dir.path())
            .generate_module(&module, Some("Soc"))
            .unwrap();
        assert_eq!(report.len(), 6);

        let header = std::fs::read_to_string(dir.path().join("include/Soc.hh")).unwrap();
        assert!(header.contains("#ifndef INCLUDE_SOC_HH_"));
        let source = std::fs::read_to_string(dir.path().join("libs/Soc.cc")).unwrap();
        assert!(source.starts_with("#include \"Soc.hh\""));
        let cmake = std::fs::read_to_string(dir.path().join("CMakeLists.txt")).unwrap();
        assert!(cmake.contains("project(Soc LANGUAGES CXX)"));
    }

    #[test]
    fn test_empty_project_name_rejected() {
        let dir = TempDir::new().unwrap();
        let err = Generator::new(dir.path())
            .generate_module(&Module::new("Cache").shared(true), Some(""))
            .unwrap_err();
        assert!(matches!(err, CodegenError::Config(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_app_files() {
        let dir = TempDir::new().unwrap();
        let top = Coordinator::new("SOCSimTop", "app_soc").group("soc");
        let report = Generator::new(dir.path()).generate_top(&top, None).unwrap();
        // top pair + main + two build files
        assert_eq!(report.len(), 5);

        let main = std::fs::read_to_string(dir.path().join("src/app_soc/main.cc")).unwrap();
        assert!(main.contains("#include \"soc/SOCSimTop.hh\""));
        assert!(main.contains("std::make_shared<soc::SOCSimTop>()"));

        let cmake =
            std::fs::read_to_string(dir.path().join("src/app_soc/libs/CMakeLists.txt")).unwrap();
        assert!(cmake.contains("add_library(app_soc_libs"));
    }

    #[test]
    fn test_from_config_uses_template_dir() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig {
            output_dir: dir.path().join("out"),
            template_dir: Some(dir.path().join("missing")),
            ..GeneratorConfig::default()
        };
        let generator = Generator::from_config(&config).unwrap();
        let err = generator
            .generate_module(&Module::new("M").shared(true), None)
            .unwrap_err();
        assert!(matches!(err, CodegenError::TemplateNotFound { .. }));
    }
}
