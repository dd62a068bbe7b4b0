// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level coordinator.
//!
//! The coordinator owns every simulator of an application and records the
//! port and channel connections between them. It is always private: its
//! files land under the application's source tree.

use indexmap::IndexMap;

use crate::channel::{channel_connection_statements, ChannelLink};
use crate::error::{CodegenError, Result};
use crate::generator::{include_directives, registration_statements, Codegen};
use crate::naming::Identity;
use crate::port::{port_connection_statements, PortLink, PortRegistry, DEFAULT_QUEUE_SIZE};
use crate::render::{markers, Renderer, TransformChain};
use crate::simulator::Simulator;
use crate::template::{Backend, TemplateId};

#[derive(Debug, Clone)]
pub struct Coordinator {
    identity: Identity,
    ports: PortRegistry,
    simulators: IndexMap<String, Simulator>,
    port_links: Vec<PortLink>,
    channel_links: Vec<ChannelLink>,
}

impl Coordinator {
    pub fn new(name: impl Into<String>, app: impl Into<String>) -> Self {
        let mut identity = Identity::new(name);
        identity.app = app.into();
        Self {
            ports: PortRegistry::new(identity.name()),
            identity,
            simulators: IndexMap::new(),
            port_links: Vec::new(),
            channel_links: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.identity.group = group.into();
        self
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn app(&self) -> &str {
        self.identity.app()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut PortRegistry {
        &mut self.ports
    }

    pub fn simulators(&self) -> impl Iterator<Item = &Simulator> {
        self.simulators.values()
    }

    pub fn simulator(&self, name: &str) -> Option<&Simulator> {
        self.simulators.get(name)
    }

    pub fn simulator_count(&self) -> usize {
        self.simulators.len()
    }

    /// Total number of modules across all simulators.
    pub fn module_count(&self) -> usize {
        self.simulators.values().map(Simulator::module_count).sum()
    }

    pub fn port_links(&self) -> &[PortLink] {
        &self.port_links
    }

    pub fn channel_links(&self) -> &[ChannelLink] {
        &self.channel_links
    }

    /// Template family used for the coordinator's own files.
    pub fn backend(&self) -> Backend {
        if self
            .simulators
            .values()
            .any(|sim| sim.simulation_backend() == Backend::SystemC)
        {
            Backend::SystemC
        } else {
            Backend::Native
        }
    }

    /// Register a simulator.
    ///
    /// Simulators on the SystemC backend are rejected here, before anything
    /// is generated.
    pub fn add_simulator(&mut self, mut sim: Simulator) -> Result<()> {
        if self.simulators.contains_key(sim.name()) {
            return Err(CodegenError::DuplicateName {
                kind: "simulator",
                name: sim.name().to_string(),
                owner: self.name().to_string(),
            });
        }
        if !sim.simulation_backend().is_supported() {
            return Err(CodegenError::UnsupportedBackend {
                entity: sim.name().to_string(),
            });
        }

        sim.inherit_app(self.identity.app());
        tracing::info!(
            "Simulator '{}' added to '{}' ({} modules)",
            sim.name(),
            self.name(),
            sim.module_count()
        );
        self.simulators.insert(sim.name().to_string(), sim);
        Ok(())
    }

    pub fn connect_port(
        &mut self,
        master: &str,
        slave: &str,
        master_port: &str,
        slave_port: &str,
    ) -> Result<()> {
        self.connect_port_with_queue(master, slave, master_port, slave_port, DEFAULT_QUEUE_SIZE)
    }

    /// Connect two registered simulators. Same rules as
    /// [`Simulator::connect_port_with_queue`].
    pub fn connect_port_with_queue(
        &mut self,
        master: &str,
        slave: &str,
        master_port: &str,
        slave_port: &str,
        queue_size: u32,
    ) -> Result<()> {
        let master_ports = self.known_simulator(master)?.ports();
        let slave_ports = self.known_simulator(slave)?.ports();
        master_ports.check_master_port(master_port)?;
        slave_ports.check_slave_port(slave_port, queue_size)?;

        if let Some(sim) = self.simulators.get_mut(master) {
            sim.ports_mut().declare_master_port(master_port)?;
        }
        if let Some(sim) = self.simulators.get_mut(slave) {
            sim.ports_mut().declare_slave_port(slave_port, queue_size)?;
        }

        tracing::debug!(
            "{}: port {}.'{}' -> {}.'{}' (queue {})",
            self.name(),
            master,
            master_port,
            slave,
            slave_port,
            queue_size
        );
        self.port_links.push(PortLink {
            master: master.to_string(),
            slave: slave.to_string(),
            master_port: master_port.to_string(),
            slave_port: slave_port.to_string(),
            queue_size,
        });
        Ok(())
    }

    /// Connect a streaming channel between two registered simulators.
    ///
    /// Channel names are never re-declared: reusing one on either side is a
    /// duplicate.
    pub fn connect_channel(
        &mut self,
        master: &str,
        slave: &str,
        master_channel: &str,
        slave_channel: &str,
    ) -> Result<()> {
        let master_channels = self.known_simulator(master)?.channels();
        let slave_channels = self.known_simulator(slave)?.channels();
        master_channels.check_master_channel(master_channel)?;
        slave_channels.check_slave_channel(slave_channel)?;

        if let Some(sim) = self.simulators.get_mut(master) {
            sim.channels_mut().add_master_channel(master_channel)?;
        }
        if let Some(sim) = self.simulators.get_mut(slave) {
            sim.channels_mut().add_slave_channel(slave_channel)?;
        }

        tracing::debug!(
            "{}: channel {}.'{}' -> {}.'{}'",
            self.name(),
            master,
            master_channel,
            slave,
            slave_channel
        );
        self.channel_links.push(ChannelLink {
            master: master.to_string(),
            slave: slave.to_string(),
            master_channel: master_channel.to_string(),
            slave_channel: slave_channel.to_string(),
        });
        Ok(())
    }

    fn known_simulator(&self, name: &str) -> Result<&Simulator> {
        self.simulators
            .get(name)
            .ok_or_else(|| CodegenError::UnknownEntity {
                kind: "simulator",
                name: name.to_string(),
                owner: self.name().to_string(),
            })
    }

    fn register_simulators(&self, content: &str) -> String {
        let children: Vec<&Identity> = self.simulators.values().map(Simulator::identity).collect();
        content
            .replace(markers::SIMULATOR_INCLUDES, &include_directives(&children))
            .replace(
                markers::SIMULATOR_REGISTRATION,
                &registration_statements(&children, "sim", "addSimulator"),
            )
    }
}

impl Codegen for Coordinator {
    fn codegen(&self, renderer: &mut Renderer) -> Result<()> {
        if self.identity.app().is_empty() {
            return Err(CodegenError::MissingApp {
                entity: self.name().to_string(),
            });
        }
        let backend = self.backend();
        if !backend.is_supported() {
            return Err(CodegenError::UnsupportedBackend {
                entity: self.name().to_string(),
            });
        }

        for sim in self.simulators.values() {
            sim.codegen(renderer)?;
        }

        let header = self.identity.include_path(true);
        let chain = TransformChain::new()
            .define_macro(&header)
            .class_name(self.name())
            .namespace(self.identity.group());
        renderer.render(TemplateId::TopHeader(backend), &header, &chain)?;

        let chain = TransformChain::new()
            .class_name(self.name())
            .namespace(self.identity.group())
            .inc_self_path(&self.identity.include_path(false))
            .then(|content| self.register_simulators(content))
            .replace(
                markers::PORT_CONNECTIONS,
                port_connection_statements(&self.port_links, "sim"),
            )
            .replace(
                markers::CHANNEL_CONNECTIONS,
                channel_connection_statements(&self.channel_links),
            );
        renderer.render(
            TemplateId::TopSource(backend),
            &self.identity.lib_path(true),
            &chain,
        )?;

        Ok(())
    }
}
