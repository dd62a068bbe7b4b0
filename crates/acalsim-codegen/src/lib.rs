// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ACALSim Code Generator
//!
//! Describes a simulation as a tree of components and compiles it into
//! C++ sources and CMake build files by placeholder substitution.
//!
//! # Features
//!
//! - **Component Model**: Coordinator, simulators and modules with checked
//!   port and channel connections
//! - **Template Substitution**: Ordered transform chains over embedded or
//!   on-disk templates
//! - **Scaffolding**: Application entry point and project build files
//! - **Design Documents**: Build a tree from a JSON interchange document
//!
//! # Quick Start
//!
//! ```bash
//! # Generate the demo tree
//! acalsim-gen demo --app demo --project-name Demo --output out
//!
//! # Generate from a design document
//! acalsim-gen generate --design soc.json --output out
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! output_dir = "out"
//! project_name = "Demo"
//! template_dir = "templates"
//! log_level = "info"
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod design;
pub mod error;
pub mod generator;
pub mod module;
pub mod naming;
pub mod port;
pub mod render;
pub mod simulator;
pub mod template;

pub use channel::{ChannelLink, ChannelRegistry};
pub use config::{ConfigError, GeneratorConfig};
pub use coordinator::Coordinator;
pub use design::DesignDocument;
pub use error::{CodegenError, Result};
pub use generator::{Codegen, Generator};
pub use module::Module;
pub use naming::Identity;
pub use port::{PortLink, PortRegistry, DEFAULT_QUEUE_SIZE};
pub use render::{GenerationReport, Renderer, TransformChain};
pub use simulator::Simulator;
pub use template::{Backend, DirTemplates, EmbeddedTemplates, TemplateId, TemplateSource};
