// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON design documents.
//!
//! A design document describes a coordinator tree in the interchange format
//! exported by diagram tools:
//!
//! ```json
//! {
//!   "ProjectName": "Soc",
//!   "SimTop": {
//!     "ClassName": "SOCSimTop",
//!     "AppName": "app_soc",
//!     "SimBases": [
//!       {
//!         "Name": "cpu",
//!         "ClassName": "CPU",
//!         "SharedLib": false,
//!         "SubFolder": "",
//!         "SimModules": [
//!           { "Name": "IFStage", "SharedLib": false },
//!           { "Name": "IDStage", "SharedLib": false }
//!         ],
//!         "SimPorts": [
//!           { "Master": "IFStage", "Slave": "IDStage",
//!             "MasterPort": "to ID", "SlavePort": "from IF", "QueueSize": 2 }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! [`DesignDocument::into_model`] replays the document through the public
//! model API, so it is subject to exactly the same checks as hand-written
//! construction code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::coordinator::Coordinator;
use crate::error::{CodegenError, Result};
use crate::module::Module;
use crate::port::DEFAULT_QUEUE_SIZE;
use crate::simulator::Simulator;
use crate::template::Backend;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(rename = "ProjectName", default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(rename = "SimTop")]
    pub top: TopSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSpec {
    #[serde(rename = "ClassName")]
    pub class_name: String,

    #[serde(rename = "AppName")]
    pub app_name: String,

    #[serde(rename = "SubFolder", default)]
    pub sub_folder: String,

    #[serde(rename = "SimBases", default)]
    pub simulators: Vec<SimulatorSpec>,

    #[serde(rename = "SimPorts", default)]
    pub ports: Vec<PortSpec>,

    #[serde(rename = "SimChannels", default)]
    pub channels: Vec<ChannelSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorSpec {
    #[serde(rename = "Name")]
    pub name: String,

    /// Generated type name. Falls back to `Name`.
    #[serde(rename = "ClassName", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(rename = "SharedLib", default)]
    pub shared: bool,

    #[serde(rename = "SubFolder", default)]
    pub sub_folder: String,

    #[serde(rename = "SystemC", default)]
    pub systemc: bool,

    #[serde(rename = "SimModules", default)]
    pub modules: Vec<ModuleSpec>,

    #[serde(rename = "SimPorts", default)]
    pub ports: Vec<PortSpec>,
}

impl SimulatorSpec {
    /// Name the simulator is registered and generated under.
    pub fn type_name(&self) -> &str {
        self.class_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "SharedLib", default)]
    pub shared: bool,

    /// Defaults to the owning simulator's sub-folder.
    #[serde(rename = "SubFolder", default, skip_serializing_if = "Option::is_none")]
    pub sub_folder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    #[serde(rename = "Master")]
    pub master: String,

    #[serde(rename = "Slave")]
    pub slave: String,

    #[serde(rename = "MasterPort")]
    pub master_port: String,

    #[serde(rename = "SlavePort")]
    pub slave_port: String,

    #[serde(rename = "QueueSize", default = "default_queue_size")]
    pub queue_size: u32,
}

fn default_queue_size() -> u32 {
    DEFAULT_QUEUE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    #[serde(rename = "Master")]
    pub master: String,

    #[serde(rename = "Slave")]
    pub slave: String,

    #[serde(rename = "MasterChannel")]
    pub master_channel: String,

    #[serde(rename = "SlaveChannel")]
    pub slave_channel: String,
}

impl DesignDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CodegenError::Design(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        tracing::debug!("Loaded design document {}", path.display());
        Self::from_json(&text)
    }

    /// Project name, if the document names a non-empty one.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Build the coordinator tree.
    ///
    /// Top-level links may refer to a simulator by either its `Name` or its
    /// `ClassName`.
    pub fn into_model(self) -> Result<Coordinator> {
        let top_spec = self.top;
        let mut top =
            Coordinator::new(top_spec.class_name, top_spec.app_name).group(top_spec.sub_folder);
        let mut aliases: HashMap<String, String> = HashMap::new();

        for spec in top_spec.simulators {
            let type_name = spec.type_name().to_string();
            aliases.insert(spec.name.clone(), type_name.clone());

            let backend = if spec.systemc {
                Backend::SystemC
            } else {
                Backend::Native
            };
            let mut sim = Simulator::new(type_name)
                .shared(spec.shared)
                .group(spec.sub_folder.clone())
                .app(top.app())
                .backend(backend);

            for module in spec.modules {
                let group = module.sub_folder.unwrap_or_else(|| spec.sub_folder.clone());
                sim.add_module(Module::new(module.name).shared(module.shared).group(group))?;
            }
            for link in &spec.ports {
                sim.connect_port_with_queue(
                    &link.master,
                    &link.slave,
                    &link.master_port,
                    &link.slave_port,
                    link.queue_size,
                )?;
            }

            top.add_simulator(sim)?;
        }

        let resolve = |name: &str| -> String {
            aliases
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.to_string())
        };

        for link in &top_spec.ports {
            top.connect_port_with_queue(
                &resolve(&link.master),
                &resolve(&link.slave),
                &link.master_port,
                &link.slave_port,
                link.queue_size,
            )?;
        }
        for link in &top_spec.channels {
            top.connect_channel(
                &resolve(&link.master),
                &resolve(&link.slave),
                &link.master_channel,
                &link.slave_channel,
            )?;
        }

        tracing::info!(
            "Design '{}' loaded: {} simulators, {} modules",
            top.name(),
            top.simulator_count(),
            top.module_count()
        );
        Ok(top)
    }
}
