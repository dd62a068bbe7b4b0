// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf compute units.

use crate::error::Result;
use crate::generator::Codegen;
use crate::naming::Identity;
use crate::port::PortRegistry;
use crate::render::{markers, Renderer, TransformChain};
use crate::template::TemplateId;

/// A leaf module owned by exactly one simulator.
#[derive(Debug, Clone)]
pub struct Module {
    identity: Identity,
    ports: PortRegistry,
}

impl Module {
    /// Create a private, ungrouped module. Use the builder methods to place
    /// it elsewhere.
    pub fn new(name: impl Into<String>) -> Self {
        let identity = Identity::new(name);
        let ports = PortRegistry::new(identity.name());
        Self { identity, ports }
    }

    /// Place the module's files in the shared library area.
    #[must_use]
    pub fn shared(mut self, shared: bool) -> Self {
        self.identity.shared = shared;
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.identity.group = group.into();
        self
    }

    #[must_use]
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.identity.app = app.into();
        self
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub(crate) fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut PortRegistry {
        &mut self.ports
    }
}

impl Codegen for Module {
    fn codegen(&self, renderer: &mut Renderer) -> Result<()> {
        self.identity.require_app()?;

        let header = self.identity.include_path(true);
        let chain = TransformChain::new()
            .define_macro(&header)
            .class_name(self.name())
            .namespace(self.identity.group());
        renderer.render(TemplateId::ModuleHeader, &header, &chain)?;

        let chain = TransformChain::new()
            .class_name(self.name())
            .inc_self_path(&self.identity.include_path(false))
            .namespace(self.identity.group())
            .replace(markers::SLAVE_PORTS, self.ports.slave_port_statements())
            .replace(markers::MASTER_PORTS, self.ports.master_port_statements());
        renderer.render(
            TemplateId::ModuleSource,
            &self.identity.lib_path(true),
            &chain,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodegenError;
    use crate::template::EmbeddedTemplates;
    use tempfile::TempDir;

    #[test]
    fn test_builder() {
        let module = Module::new("ModuleA").shared(true).group("sima").app("demo");
        assert_eq!(module.name(), "ModuleA");
        assert!(module.identity().is_shared());
        assert_eq!(module.identity().group(), "sima");
        assert_eq!(module.identity().app(), "demo");
    }

    #[test]
    fn test_private_module_without_app() {
        let dir = TempDir::new().unwrap();
        let mut renderer = Renderer::new(&EmbeddedTemplates, dir.path());
        let err = Module::new("M").codegen(&mut renderer).unwrap_err();
        assert!(matches!(err, CodegenError::MissingApp { .. }));
        assert!(renderer.report().is_empty());
    }

    #[test]
    fn test_codegen_writes_pair() {
        let dir = TempDir::new().unwrap();
        let mut module = Module::new("IFStage").app("app_soc");
        module.ports_mut().add_master_port("to ID").unwrap();
        module.ports_mut().add_slave_port("from MEM", 2).unwrap();

        let mut renderer = Renderer::new(&EmbeddedTemplates, dir.path());
        module.codegen(&mut renderer).unwrap();
        assert_eq!(renderer.report().len(), 2);

        let header =
            std::fs::read_to_string(dir.path().join("src/app_soc/include/IFStage.hh")).unwrap();
        assert!(header.contains("#ifndef SRC_APP_SOC_INCLUDE_IFSTAGE_HH_"));
        assert!(header.contains("class IFStage : public acalsim::SimModule"));
        assert!(!header.contains("namespace"));
        assert!(!header.contains("{{"));

        let source =
            std::fs::read_to_string(dir.path().join("src/app_soc/libs/IFStage.cc")).unwrap();
        assert!(source.starts_with("#include \"IFStage.hh\""));
        assert!(source.contains("this->addMasterPort(\"to ID\");"));
        assert!(source.contains("this->addSlavePort(\"from MEM\", 2);"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_shared_grouped_module() {
        let dir = TempDir::new().unwrap();
        let module = Module::new("ModuleX").shared(true).group("sima");
        let mut renderer = Renderer::new(&EmbeddedTemplates, dir.path());
        module.codegen(&mut renderer).unwrap();

        let header = std::fs::read_to_string(dir.path().join("include/sima/ModuleX.hh")).unwrap();
        assert_eq!(header.matches("namespace sima {").count(), 1);
        assert_eq!(header.matches("}  // namespace sima").count(), 1);

        let source = std::fs::read_to_string(dir.path().join("libs/sima/ModuleX.cc")).unwrap();
        assert!(source.contains("#include \"sima/ModuleX.hh\""));
    }
}
