// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Template identifiers and the sources that resolve them.
//!
//! The generator never looks at the location of the running binary: it asks
//! an injected [`TemplateSource`] for template text by [`TemplateId`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};

/// Simulation backend a simulator is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Event-driven C++ backend.
    #[default]
    Native,
    /// SystemC backend. Reserved: the template family exists but generation
    /// through it is rejected.
    SystemC,
}

impl Backend {
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Native)
    }

    fn family_dir(self) -> &'static str {
        match self {
            Self::Native => "cc",
            Self::SystemC => "sc",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Native => "TCC",
            Self::SystemC => "TSC",
        }
    }
}

/// Every template the generator can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    ModuleHeader,
    ModuleSource,
    SimulatorHeader(Backend),
    SimulatorSource(Backend),
    TopHeader(Backend),
    TopSource(Backend),
    Main(Backend),
    ProjectBuild,
    ProjectLibsBuild,
    ProjectHeader,
    ProjectSource,
    AppBuild,
    AppLibsBuild,
}

impl TemplateId {
    pub const ALL: [TemplateId; 18] = [
        Self::ModuleHeader,
        Self::ModuleSource,
        Self::SimulatorHeader(Backend::Native),
        Self::SimulatorSource(Backend::Native),
        Self::TopHeader(Backend::Native),
        Self::TopSource(Backend::Native),
        Self::Main(Backend::Native),
        Self::SimulatorHeader(Backend::SystemC),
        Self::SimulatorSource(Backend::SystemC),
        Self::TopHeader(Backend::SystemC),
        Self::TopSource(Backend::SystemC),
        Self::Main(Backend::SystemC),
        Self::ProjectBuild,
        Self::ProjectLibsBuild,
        Self::ProjectHeader,
        Self::ProjectSource,
        Self::AppBuild,
        Self::AppLibsBuild,
    ];

    /// Path of the template relative to a template root.
    pub fn relative_path(self) -> String {
        match self {
            Self::ModuleHeader => "cc/TCCSimModule.hh".into(),
            Self::ModuleSource => "cc/TCCSimModule.cc".into(),
            Self::SimulatorHeader(b) => format!("{}/{}SimBase.hh", b.family_dir(), b.prefix()),
            Self::SimulatorSource(b) => format!("{}/{}SimBase.cc", b.family_dir(), b.prefix()),
            Self::TopHeader(b) => format!("{}/{}SimTop.hh", b.family_dir(), b.prefix()),
            Self::TopSource(b) => format!("{}/{}SimTop.cc", b.family_dir(), b.prefix()),
            Self::Main(b) => format!("{}/{}Main.cc", b.family_dir(), b.prefix()),
            Self::ProjectBuild => "cmake/Project.cmake".into(),
            Self::ProjectLibsBuild => "cmake/ProjectLibs.cmake".into(),
            Self::ProjectHeader => "cc/TInclude.hh".into(),
            Self::ProjectSource => "cc/TInclude.cc".into(),
            Self::AppBuild => "cmake/App.cmake".into(),
            Self::AppLibsBuild => "cmake/AppLibs.cmake".into(),
        }
    }
}

/// Resolves template text by id.
pub trait TemplateSource {
    fn load(&self, id: TemplateId) -> Result<String>;
}

/// Templates compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    fn text(id: TemplateId) -> &'static str {
        match id {
            TemplateId::ModuleHeader => include_str!("../templates/cc/TCCSimModule.hh"),
            TemplateId::ModuleSource => include_str!("../templates/cc/TCCSimModule.cc"),
            TemplateId::SimulatorHeader(Backend::Native) => {
                include_str!("../templates/cc/TCCSimBase.hh")
            }
            TemplateId::SimulatorSource(Backend::Native) => {
                include_str!("../templates/cc/TCCSimBase.cc")
            }
            TemplateId::TopHeader(Backend::Native) => include_str!("../templates/cc/TCCSimTop.hh"),
            TemplateId::TopSource(Backend::Native) => include_str!("../templates/cc/TCCSimTop.cc"),
            TemplateId::Main(Backend::Native) => include_str!("../templates/cc/TCCMain.cc"),
            TemplateId::SimulatorHeader(Backend::SystemC) => {
                include_str!("../templates/sc/TSCSimBase.hh")
            }
            TemplateId::SimulatorSource(Backend::SystemC) => {
                include_str!("../templates/sc/TSCSimBase.cc")
            }
            TemplateId::TopHeader(Backend::SystemC) => {
                include_str!("../templates/sc/TSCSimTop.hh")
            }
            TemplateId::TopSource(Backend::SystemC) => {
                include_str!("../templates/sc/TSCSimTop.cc")
            }
            TemplateId::Main(Backend::SystemC) => include_str!("../templates/sc/TSCMain.cc"),
            TemplateId::ProjectBuild => include_str!("../templates/cmake/Project.cmake"),
            TemplateId::ProjectLibsBuild => include_str!("../templates/cmake/ProjectLibs.cmake"),
            TemplateId::ProjectHeader => include_str!("../templates/cc/TInclude.hh"),
            TemplateId::ProjectSource => include_str!("../templates/cc/TInclude.cc"),
            TemplateId::AppBuild => include_str!("../templates/cmake/App.cmake"),
            TemplateId::AppLibsBuild => include_str!("../templates/cmake/AppLibs.cmake"),
        }
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, id: TemplateId) -> Result<String> {
        Ok(Self::text(id).to_string())
    }
}

/// Templates read from a directory laid out like the embedded set
/// (`cc/`, `sc/`, `cmake/`).
#[derive(Debug, Clone)]
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the embedded set under `root`, as a starting point for
    /// customised templates.
    pub fn export_embedded(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        let mut written = Vec::new();
        for id in TemplateId::ALL {
            let path = root.join(id.relative_path());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
            }
            std::fs::write(&path, EmbeddedTemplates::text(id))
                .map_err(|e| CodegenError::io(&path, e))?;
            written.push(path);
        }
        Ok(written)
    }
}

impl TemplateSource for DirTemplates {
    fn load(&self, id: TemplateId) -> Result<String> {
        let path = self.root.join(id.relative_path());
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CodegenError::TemplateNotFound { id, path },
            _ => CodegenError::io(path, e),
        })
    }
}
