// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Streaming channels between simulators.
//!
//! Channels live in their own namespace: a name may appear both as a port
//! and as a channel on the same simulator.

use crate::error::{CodegenError, Result};

#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    owner: String,
    masters: Vec<String>,
    slaves: Vec<String>,
}

impl ChannelRegistry {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            masters: Vec::new(),
            slaves: Vec::new(),
        }
    }

    pub fn add_master_channel(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.check_master_channel(&name)?;
        self.masters.push(name);
        Ok(())
    }

    pub fn add_slave_channel(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.check_slave_channel(&name)?;
        self.slaves.push(name);
        Ok(())
    }

    pub fn check_master_channel(&self, name: &str) -> Result<()> {
        if self.has_master_channel(name) {
            return Err(self.duplicate("master channel", name));
        }
        Ok(())
    }

    pub fn check_slave_channel(&self, name: &str) -> Result<()> {
        if self.has_slave_channel(name) {
            return Err(self.duplicate("slave channel", name));
        }
        Ok(())
    }

    pub fn has_master_channel(&self, name: &str) -> bool {
        self.masters.iter().any(|c| c == name)
    }

    pub fn has_slave_channel(&self, name: &str) -> bool {
        self.slaves.iter().any(|c| c == name)
    }

    pub fn master_channels(&self) -> impl Iterator<Item = &str> {
        self.masters.iter().map(String::as_str)
    }

    pub fn slave_channels(&self) -> impl Iterator<Item = &str> {
        self.slaves.iter().map(String::as_str)
    }

    fn duplicate(&self, kind: &'static str, name: &str) -> CodegenError {
        CodegenError::DuplicateName {
            kind,
            name: name.to_string(),
            owner: self.owner.clone(),
        }
    }
}

/// A channel connection recorded by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLink {
    pub master: String,
    pub slave: String,
    pub master_channel: String,
    pub slave_channel: String,
}

/// `ChannelPortManager::ConnectPort` statements, one per link.
pub fn channel_connection_statements(links: &[ChannelLink]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "acalsim::ChannelPortManager::ConnectPort({}_sim, {}_sim, \"{}\", \"{}\");",
                link.master, link.slave, link.master_channel, link.slave_channel
            )
        })
        .collect::<Vec<_>>()
        .join("\n\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_channels_rejected() {
        let mut channels = ChannelRegistry::new("A");
        channels.add_master_channel("to X").unwrap();
        channels.add_slave_channel("from X").unwrap();

        assert!(channels.add_master_channel("to X").is_err());
        assert!(channels.add_slave_channel("from X").is_err());
    }

    #[test]
    fn test_master_and_slave_sets_are_independent() {
        let mut channels = ChannelRegistry::new("A");
        channels.add_master_channel("bus").unwrap();
        channels.add_slave_channel("bus").unwrap();
        assert!(channels.has_master_channel("bus"));
        assert!(channels.has_slave_channel("bus"));
        assert_eq!(channels.master_channels().collect::<Vec<_>>(), ["bus"]);
    }

    #[test]
    fn test_channel_statements() {
        let links = vec![
            ChannelLink {
                master: "A".into(),
                slave: "X".into(),
                master_channel: "to X".into(),
                slave_channel: "from A".into(),
            },
            ChannelLink {
                master: "X".into(),
                slave: "A".into(),
                master_channel: "to A".into(),
                slave_channel: "from X".into(),
            },
        ];
        let text = channel_connection_statements(&links);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(
            "acalsim::ChannelPortManager::ConnectPort(A_sim, X_sim, \"to X\", \"from A\");"
        ));
    }
}
