// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Point-to-point ports: per-entity registry and connection records.

use indexmap::IndexMap;

use crate::error::{CodegenError, Result};

/// Slave queue size used when a connection does not specify one.
pub const DEFAULT_QUEUE_SIZE: u32 = 1;

/// Master and slave port names registered on one entity.
///
/// Append-only: there is no removal for the lifetime of a generation run.
#[derive(Debug, Clone, Default)]
pub struct PortRegistry {
    owner: String,
    masters: Vec<String>,
    slaves: IndexMap<String, u32>,
}

impl PortRegistry {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            masters: Vec::new(),
            slaves: IndexMap::new(),
        }
    }

    pub fn add_master_port(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.has_master_port(&name) {
            return Err(CodegenError::DuplicateName {
                kind: "master port",
                name,
                owner: self.owner.clone(),
            });
        }
        self.masters.push(name);
        Ok(())
    }

    pub fn add_slave_port(&mut self, name: impl Into<String>, queue_size: u32) -> Result<()> {
        let name = name.into();
        if self.has_slave_port(&name) {
            return Err(CodegenError::DuplicateName {
                kind: "slave port",
                name,
                owner: self.owner.clone(),
            });
        }
        if queue_size == 0 {
            return Err(CodegenError::InvalidQueueSize {
                entity: self.owner.clone(),
                port: name,
            });
        }
        self.slaves.insert(name, queue_size);
        Ok(())
    }

    pub fn has_master_port(&self, name: &str) -> bool {
        self.masters.iter().any(|m| m == name)
    }

    pub fn has_slave_port(&self, name: &str) -> bool {
        self.slaves.contains_key(name)
    }

    /// Queue size fixed at the slave port's first declaration.
    pub fn slave_queue_size(&self, name: &str) -> Option<u32> {
        self.slaves.get(name).copied()
    }

    pub fn master_ports(&self) -> impl Iterator<Item = &str> {
        self.masters.iter().map(String::as_str)
    }

    pub fn slave_ports(&self) -> impl Iterator<Item = (&str, u32)> {
        self.slaves.iter().map(|(name, size)| (name.as_str(), *size))
    }

    /// Fails if `name` cannot be declared as the master side of a new
    /// connection. A master port that already exists is a conflict, never a
    /// no-op.
    pub fn check_master_port(&self, name: &str) -> Result<()> {
        if self.has_master_port(name) {
            return Err(CodegenError::PortConflict {
                entity: self.owner.clone(),
                reason: format!("master port '{}' is already declared", name),
            });
        }
        Ok(())
    }

    /// Fails if `name` cannot be declared as the slave side of a new
    /// connection. Re-declaring with the same queue size is accepted; any
    /// other size is a conflict.
    pub fn check_slave_port(&self, name: &str, queue_size: u32) -> Result<()> {
        match self.slave_queue_size(name) {
            Some(existing) if existing == queue_size => Ok(()),
            Some(existing) => Err(CodegenError::PortConflict {
                entity: self.owner.clone(),
                reason: format!(
                    "slave port '{}' has queue size {}, requested {}",
                    name, existing, queue_size
                ),
            }),
            None if queue_size == 0 => Err(CodegenError::InvalidQueueSize {
                entity: self.owner.clone(),
                port: name.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn declare_master_port(&mut self, name: &str) -> Result<()> {
        self.check_master_port(name)?;
        self.masters.push(name.to_string());
        Ok(())
    }

    pub fn declare_slave_port(&mut self, name: &str, queue_size: u32) -> Result<()> {
        self.check_slave_port(name, queue_size)?;
        self.slaves.entry(name.to_string()).or_insert(queue_size);
        Ok(())
    }

    /// `this->addMasterPort(..)` statements in registration order.
    pub fn master_port_statements(&self) -> String {
        self.masters
            .iter()
            .map(|name| format!("this->addMasterPort(\"{}\");", name))
            .collect::<Vec<_>>()
            .join("\n\t")
    }

    /// `this->addSlavePort(..)` statements in registration order.
    pub fn slave_port_statements(&self) -> String {
        self.slaves
            .iter()
            .map(|(name, size)| format!("this->addSlavePort(\"{}\", {});", name, size))
            .collect::<Vec<_>>()
            .join("\n\t")
    }
}

/// A port connection recorded by the owner that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortLink {
    pub master: String,
    pub slave: String,
    pub master_port: String,
    pub slave_port: String,
    pub queue_size: u32,
}

/// `ConnectPort` statements for a list of links. `suffix` is the variable
/// suffix the owner gives its children (`mod` or `sim`).
pub fn port_connection_statements(links: &[PortLink], suffix: &str) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "acalsim::SimPortManager::ConnectPort({}_{}, {}_{}, \"{}\", \"{}\");",
                link.master, suffix, link.slave, suffix, link.master_port, link.slave_port
            )
        })
        .collect::<Vec<_>>()
        .join("\n\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_master_port() {
        let mut ports = PortRegistry::new("M1");
        ports.add_master_port("out").unwrap();
        assert!(ports.has_master_port("out"));
        assert!(matches!(
            ports.add_master_port("out"),
            Err(CodegenError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_duplicate_slave_port() {
        let mut ports = PortRegistry::new("M2");
        ports.add_slave_port("in", 2).unwrap();
        assert_eq!(ports.slave_queue_size("in"), Some(2));
        assert!(matches!(
            ports.add_slave_port("in", 2),
            Err(CodegenError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_same_name_in_master_and_slave_sets() {
        let mut ports = PortRegistry::new("M");
        ports.add_master_port("link").unwrap();
        ports.add_slave_port("link", 1).unwrap();
        assert!(ports.has_master_port("link"));
        assert!(ports.has_slave_port("link"));
    }

    #[test]
    fn test_declare_slave_port_matching_size() {
        let mut ports = PortRegistry::new("X");
        ports.declare_slave_port("req", 4).unwrap();
        ports.declare_slave_port("req", 4).unwrap();
        assert_eq!(ports.slave_ports().count(), 1);
    }

    #[test]
    fn test_declare_slave_port_conflicting_size() {
        let mut ports = PortRegistry::new("X");
        ports.declare_slave_port("req", 4).unwrap();
        let err = ports.declare_slave_port("req", 8).unwrap_err();
        assert!(matches!(err, CodegenError::PortConflict { .. }));
        assert_eq!(ports.slave_queue_size("req"), Some(4));
    }

    #[test]
    fn test_declare_master_port_twice_conflicts() {
        let mut ports = PortRegistry::new("X");
        ports.declare_master_port("out").unwrap();
        assert!(matches!(
            ports.declare_master_port("out"),
            Err(CodegenError::PortConflict { .. })
        ));
    }

    #[test]
    fn test_checks_leave_registry_untouched() {
        let mut ports = PortRegistry::new("X");
        ports.declare_slave_port("req", 4).unwrap();
        assert!(ports.check_slave_port("req", 4).is_ok());
        assert!(ports.check_slave_port("req", 8).is_err());
        assert!(matches!(
            ports.check_slave_port("other", 0),
            Err(CodegenError::InvalidQueueSize { .. })
        ));
        assert!(ports.check_master_port("out").is_ok());
        assert!(!ports.has_master_port("out"));
        assert!(!ports.has_slave_port("other"));
    }

    #[test]
    fn test_zero_queue_size_rejected() {
        let mut ports = PortRegistry::new("X");
        assert!(matches!(
            ports.add_slave_port("in", 0),
            Err(CodegenError::InvalidQueueSize { .. })
        ));
    }

    #[test]
    fn test_statements_follow_registration_order() {
        let mut ports = PortRegistry::new("X");
        ports.add_master_port("b").unwrap();
        ports.add_master_port("a").unwrap();
        ports.add_slave_port("z", 3).unwrap();
        ports.add_slave_port("y", 1).unwrap();

        assert_eq!(
            ports.master_port_statements(),
            "this->addMasterPort(\"b\");\n\tthis->addMasterPort(\"a\");"
        );
        assert_eq!(
            ports.slave_port_statements(),
            "this->addSlavePort(\"z\", 3);\n\tthis->addSlavePort(\"y\", 1);"
        );
    }

    #[test]
    fn test_connection_statements() {
        let links = vec![PortLink {
            master: "M1".into(),
            slave: "M2".into(),
            master_port: "out".into(),
            slave_port: "in".into(),
            queue_size: 4,
        }];
        assert_eq!(
            port_connection_statements(&links, "mod"),
            "acalsim::SimPortManager::ConnectPort(M1_mod, M2_mod, \"out\", \"in\");"
        );
        assert_eq!(port_connection_statements(&[], "sim"), "");
    }
}
