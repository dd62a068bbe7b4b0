// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for model construction and code generation.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::template::TemplateId;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors raised while building a component tree or generating files from it.
///
/// Every variant is raised at the point of violation and never recovered
/// internally; callers abort the whole run on the first error.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A name collides in a registry that requires uniqueness.
    #[error("{kind} '{name}' already exists in '{owner}'")]
    DuplicateName {
        kind: &'static str,
        name: String,
        owner: String,
    },

    /// Two declarations of the same port disagree, or a master port is
    /// declared twice.
    #[error("port conflict on '{entity}': {reason}")]
    PortConflict { entity: String, reason: String },

    /// A connection references an entity that is not a child of the
    /// declaring owner.
    #[error("unknown {kind} '{name}' in '{owner}'; add it before connecting")]
    UnknownEntity {
        kind: &'static str,
        name: String,
        owner: String,
    },

    /// A private entity has no application to place its files under.
    #[error("'{entity}' has no application; private entities require an app")]
    MissingApp { entity: String },

    /// The alternate simulation backend was requested.
    #[error("SystemC backend is not integrated into code generation ('{entity}')")]
    UnsupportedBackend { entity: String },

    /// Slave-port capacities must be positive.
    #[error("slave port '{port}' on '{entity}' has zero queue size")]
    InvalidQueueSize { entity: String, port: String },

    /// The template source has no entry for the requested template.
    #[error("template {id:?} not found at {path}")]
    TemplateNotFound { id: TemplateId, path: PathBuf },

    /// Template unreadable or destination unwritable.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A design document could not be parsed.
    #[error("invalid design document: {0}")]
    Design(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is a permanent rejection of the model rather than
    /// an environmental failure.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. }
                | Self::PortConflict { .. }
                | Self::UnknownEntity { .. }
                | Self::MissingApp { .. }
                | Self::UnsupportedBackend { .. }
                | Self::InvalidQueueSize { .. }
        )
    }
}
