// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mid-level simulators and the module connections declared inside them.

use indexmap::IndexMap;

use crate::channel::ChannelRegistry;
use crate::error::{CodegenError, Result};
use crate::generator::{include_directives, registration_statements, Codegen};
use crate::module::Module;
use crate::naming::Identity;
use crate::port::{port_connection_statements, PortLink, PortRegistry, DEFAULT_QUEUE_SIZE};
use crate::render::{markers, Renderer, TransformChain};
use crate::template::{Backend, TemplateId};

/// A simulator owning zero or more modules.
#[derive(Debug, Clone)]
pub struct Simulator {
    identity: Identity,
    backend: Backend,
    ports: PortRegistry,
    channels: ChannelRegistry,
    modules: IndexMap<String, Module>,
    links: Vec<PortLink>,
}

impl Simulator {
    pub fn new(name: impl Into<String>) -> Self {
        let identity = Identity::new(name);
        Self {
            ports: PortRegistry::new(identity.name()),
            channels: ChannelRegistry::new(identity.name()),
            identity,
            backend: Backend::Native,
            modules: IndexMap::new(),
            links: Vec::new(),
        }
    }

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

    /// Set the owning application. Private modules already added follow.
    #[must_use]
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.identity.app = app.into();
        self.restamp_modules();
        self
    }

    #[must_use]
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn simulation_backend(&self) -> Backend {
        self.backend
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut PortRegistry {
        &mut self.ports
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut ChannelRegistry {
        &mut self.channels
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn links(&self) -> &[PortLink] {
        &self.links
    }

    /// Register a module. A private module takes this simulator's
    /// application.
    pub fn add_module(&mut self, mut module: Module) -> Result<()> {
        if self.modules.contains_key(module.name()) {
            return Err(CodegenError::DuplicateName {
                kind: "module",
                name: module.name().to_string(),
                owner: self.name().to_string(),
            });
        }
        module.identity_mut().inherit_app(self.identity.app());
        tracing::info!(
            "Module '{}' added to simulator '{}'",
            module.name(),
            self.name()
        );
        self.modules.insert(module.name().to_string(), module);
        Ok(())
    }

    /// Connect two registered modules with the default queue size.
    pub fn connect_port(
        &mut self,
        master: &str,
        slave: &str,
        master_port: &str,
        slave_port: &str,
    ) -> Result<()> {
        self.connect_port_with_queue(master, slave, master_port, slave_port, DEFAULT_QUEUE_SIZE)
    }

    /// Connect `master.master_port` to `slave.slave_port`, declaring both
    /// ports. The master port must be new; the slave port may already exist
    /// with the same queue size.
    pub fn connect_port_with_queue(
        &mut self,
        master: &str,
        slave: &str,
        master_port: &str,
        slave_port: &str,
        queue_size: u32,
    ) -> Result<()> {
        let master_ports = self.known_module(master)?.ports();
        let slave_ports = self.known_module(slave)?.ports();
        // Both sides are checked before either registry changes.
        master_ports.check_master_port(master_port)?;
        slave_ports.check_slave_port(slave_port, queue_size)?;

        if let Some(module) = self.modules.get_mut(master) {
            module.ports_mut().declare_master_port(master_port)?;
        }
        if let Some(module) = self.modules.get_mut(slave) {
            module.ports_mut().declare_slave_port(slave_port, queue_size)?;
        }

        tracing::debug!(
            "{}: connect {}.'{}' -> {}.'{}' (queue {})",
            self.name(),
            master,
            master_port,
            slave,
            slave_port,
            queue_size
        );
        self.links.push(PortLink {
            master: master.to_string(),
            slave: slave.to_string(),
            master_port: master_port.to_string(),
            slave_port: slave_port.to_string(),
            queue_size,
        });
        Ok(())
    }

    fn known_module(&self, name: &str) -> Result<&Module> {
        self.modules
            .get(name)
            .ok_or_else(|| CodegenError::UnknownEntity {
                kind: "module",
                name: name.to_string(),
                owner: self.name().to_string(),
            })
    }

    /// Called by the coordinator when it stamps its application on a
    /// private simulator.
    pub(crate) fn inherit_app(&mut self, app: &str) {
        if !self.identity.is_shared() {
            self.identity.app = app.to_string();
            self.restamp_modules();
        }
    }

    fn restamp_modules(&mut self) {
        let app = self.identity.app.clone();
        for module in self.modules.values_mut() {
            module.identity_mut().inherit_app(&app);
        }
    }

    fn register_modules(&self, content: &str) -> String {
        let children: Vec<&Identity> = self.modules.values().map(Module::identity).collect();
        content
            .replace(markers::MODULE_INCLUDES, &include_directives(&children))
            .replace(
                markers::MODULE_REGISTRATION,
                &registration_statements(&children, "mod", "addModule"),
            )
    }
}

impl Codegen for Simulator {
    fn codegen(&self, renderer: &mut Renderer) -> Result<()> {
        if !self.backend.is_supported() {
            return Err(CodegenError::UnsupportedBackend {
                entity: self.name().to_string(),
            });
        }
        self.identity.require_app()?;

        for module in self.modules.values() {
            module.codegen(renderer)?;
        }

        let header = self.identity.include_path(true);
        let chain = TransformChain::new()
            .define_macro(&header)
            .namespace(self.identity.group())
            .class_name(self.name());
        renderer.render(TemplateId::SimulatorHeader(self.backend), &header, &chain)?;

        let chain = TransformChain::new()
            .class_name(self.name())
            .inc_self_path(&self.identity.include_path(false))
            .namespace(self.identity.group())
            .replace(markers::SLAVE_PORTS, self.ports.slave_port_statements())
            .replace(markers::MASTER_PORTS, self.ports.master_port_statements())
            .then(|content| self.register_modules(content))
            .replace(
                markers::PORT_CONNECTIONS,
                port_connection_statements(&self.links, "mod"),
            );
        renderer.render(
            TemplateId::SimulatorSource(self.backend),
            &self.identity.lib_path(true),
            &chain,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::EmbeddedTemplates;
    use tempfile::TempDir;

    fn simulator_with(modules: &[&str]) -> Simulator {
        let mut sim = Simulator::new("A").app("demo");
        for name in modules {
            sim.add_module(Module::new(*name)).unwrap();
        }
        sim
    }

    #[test]
    fn test_add_module_duplicate() {
        let mut sim = simulator_with(&["M1"]);
        let err = sim.add_module(Module::new("M1")).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateName { .. }));
        assert_eq!(sim.module_count(), 1);
    }

    #[test]
    fn test_add_module_stamps_app() {
        let mut sim = Simulator::new("A").app("demo");
        sim.add_module(Module::new("Private").app("other")).unwrap();
        sim.add_module(Module::new("Shared").shared(true).app("lib")).unwrap();

        assert_eq!(sim.module("Private").unwrap().identity().app(), "demo");
        assert_eq!(sim.module("Shared").unwrap().identity().app(), "lib");
    }

    #[test]
    fn test_late_app_restamps_modules() {
        let mut sim = Simulator::new("A");
        sim.add_module(Module::new("M1")).unwrap();
        let sim = sim.app("demo");
        assert_eq!(sim.module("M1").unwrap().identity().app(), "demo");
    }

    #[test]
    fn test_connect_unknown_module() {
        let mut sim = simulator_with(&["M1"]);
        let err = sim.connect_port("M1", "Ghost", "out", "in").unwrap_err();
        assert!(matches!(err, CodegenError::UnknownEntity { .. }));
        assert!(sim.links().is_empty());
    }

    #[test]
    fn test_connect_registers_ports() {
        let mut sim = simulator_with(&["M1", "M2"]);
        sim.connect_port_with_queue("M1", "M2", "out", "in", 4).unwrap();

        assert!(sim.module("M1").unwrap().ports().has_master_port("out"));
        assert_eq!(
            sim.module("M2").unwrap().ports().slave_queue_size("in"),
            Some(4)
        );
        assert_eq!(sim.links().len(), 1);
    }

    #[test]
    fn test_fan_in_shares_slave_port() {
        let mut sim = simulator_with(&["A", "B", "X"]);
        sim.connect_port_with_queue("A", "X", "A to X", "X from A/B", 4).unwrap();
        sim.connect_port_with_queue("B", "X", "B to X", "X from A/B", 4).unwrap();
        assert_eq!(sim.links().len(), 2);

        let err = sim
            .connect_port_with_queue("A", "X", "A to X again", "X from A/B", 2)
            .unwrap_err();
        assert!(matches!(err, CodegenError::PortConflict { .. }));
    }

    #[test]
    fn test_failed_connect_leaves_ports_unchanged() {
        let mut sim = simulator_with(&["Cpu", "Dma", "Mem"]);
        sim.connect_port_with_queue("Cpu", "Mem", "cpu req", "req", 4).unwrap();

        let err = sim
            .connect_port_with_queue("Dma", "Mem", "dma req", "req", 8)
            .unwrap_err();
        assert!(matches!(err, CodegenError::PortConflict { .. }));
        let err = sim
            .connect_port_with_queue("Dma", "Mem", "dma req", "dma in", 0)
            .unwrap_err();
        assert!(matches!(err, CodegenError::InvalidQueueSize { .. }));

        assert!(!sim.module("Dma").unwrap().ports().has_master_port("dma req"));
        assert!(!sim.module("Mem").unwrap().ports().has_slave_port("dma in"));
        assert_eq!(sim.links().len(), 1);

        sim.connect_port_with_queue("Dma", "Mem", "dma req", "req", 4).unwrap();
        assert_eq!(sim.links().len(), 2);
    }

    #[test]
    fn test_codegen_requires_app() {
        let dir = TempDir::new().unwrap();
        let sim = Simulator::new("S");
        let mut renderer = Renderer::new(&EmbeddedTemplates, dir.path());
        let err = sim.codegen(&mut renderer).unwrap_err();
        assert!(matches!(err, CodegenError::MissingApp { .. }));
        assert!(renderer.report().is_empty());
    }

    #[test]
    fn test_master_port_redeclared() {
        let mut sim = simulator_with(&["M1", "M2"]);
        sim.connect_port("M1", "M2", "out", "in").unwrap();
        let err = sim.connect_port("M1", "M2", "out", "in2").unwrap_err();
        assert!(matches!(err, CodegenError::PortConflict { .. }));
    }

    #[test]
    fn test_systemc_simulator_rejected_at_codegen() {
        let dir = TempDir::new().unwrap();
        let sim = Simulator::new("SC").app("demo").backend(Backend::SystemC);
        let mut renderer = Renderer::new(&EmbeddedTemplates, dir.path());
        let err = sim.codegen(&mut renderer).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedBackend { .. }));
        assert!(renderer.report().is_empty());
    }

    #[test]
    fn test_codegen_registers_modules() {
        let dir = TempDir::new().unwrap();
        let mut sim = simulator_with(&["IFStage", "IDStage"]);
        sim.connect_port("IFStage", "IDStage", "to ID", "from IF").unwrap();

        let mut renderer = Renderer::new(&EmbeddedTemplates, dir.path());
        sim.codegen(&mut renderer).unwrap();
        assert_eq!(renderer.report().len(), 6);

        let source = std::fs::read_to_string(dir.path().join("src/demo/libs/A.cc")).unwrap();
        assert!(source.contains("#include \"IFStage.hh\"\n#include \"IDStage.hh\""));
        assert!(source.contains(
            "auto IFStage_mod = new IFStage(\"IFStage\");\n\tauto IDStage_mod = new IDStage(\"IDStage\");"
        ));
        assert!(source.contains("this->addModule(IFStage_mod);\n\tthis->addModule(IDStage_mod);"));
        assert!(source.contains(
            "acalsim::SimPortManager::ConnectPort(IFStage_mod, IDStage_mod, \"to ID\", \"from IF\");"
        ));
        assert!(!source.contains("{{"));
    }
}
