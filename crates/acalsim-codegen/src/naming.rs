// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity identity and the naming rules derived from it.
//!
//! All paths produced here are relative to the output root and always use
//! `/` separators, so the text embedded in generated files does not depend
//! on the host platform.

use crate::error::{CodegenError, Result};

/// Header file extension of generated sources.
pub const HEADER_EXT: &str = "hh";
/// Implementation file extension of generated sources.
pub const SOURCE_EXT: &str = "cc";

/// Kind directory an artifact lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactDir {
    Include,
    Libs,
}

impl ArtifactDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Libs => "libs",
        }
    }
}

/// Name, namespace and placement shared by modules, simulators and the
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub(crate) name: String,
    pub(crate) group: String,
    pub(crate) shared: bool,
    pub(crate) app: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: String::new(),
            shared: false,
            app: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Directory holding this entity's files of the given kind.
    ///
    /// With `full == false` only the group part is returned, which is the
    /// prefix used by `#include` lines.
    pub fn folder_path(&self, dir: ArtifactDir, full: bool) -> String {
        if !full {
            return self.group.clone();
        }
        if self.shared {
            join_path(&[dir.as_str(), &self.group])
        } else {
            join_path(&["src", &self.app, dir.as_str(), &self.group])
        }
    }

    pub fn include_path(&self, full: bool) -> String {
        join_path(&[
            &self.folder_path(ArtifactDir::Include, full),
            &format!("{}.{}", self.name, HEADER_EXT),
        ])
    }

    pub fn lib_path(&self, full: bool) -> String {
        join_path(&[
            &self.folder_path(ArtifactDir::Libs, full),
            &format!("{}.{}", self.name, SOURCE_EXT),
        ])
    }

    /// Type name as referenced from outside the entity's namespace.
    pub fn qualified_name(&self) -> String {
        if self.group.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.group, self.name)
        }
    }

    /// Private entities need an application before any path is computed.
    pub(crate) fn require_app(&self) -> Result<()> {
        if !self.shared && self.app.is_empty() {
            return Err(CodegenError::MissingApp {
                entity: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Ownership-propagated default: private children follow their parent's
    /// application.
    pub(crate) fn inherit_app(&mut self, app: &str) {
        if !self.shared {
            self.app = app.to_string();
        }
    }
}

/// Join path segments with `/`, skipping empty ones.
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Include guard derived from a destination path.
///
/// `src/demo/include/A.hh` becomes `SRC_DEMO_INCLUDE_A_HH_`.
pub fn define_macro(path: &str) -> String {
    let mut guard: String = path
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    guard.push('_');
    guard
}

/// Opening namespace wrapper, empty when there is no group.
pub fn namespace_head(group: &str) -> String {
    if group.is_empty() {
        String::new()
    } else {
        format!("\nnamespace {} {{\n", group)
    }
}

/// Closing namespace wrapper, empty when there is no group.
pub fn namespace_footer(group: &str) -> String {
    if group.is_empty() {
        String::new()
    } else {
        format!("\n}}  // namespace {}\n", group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, group: &str, shared: bool, app: &str) -> Identity {
        Identity {
            name: name.into(),
            group: group.into(),
            shared,
            app: app.into(),
        }
    }

    #[test]
    fn test_private_paths() {
        let id = identity("CPU", "", false, "app_soc");
        assert_eq!(id.include_path(true), "src/app_soc/include/CPU.hh");
        assert_eq!(id.lib_path(true), "src/app_soc/libs/CPU.cc");
        assert_eq!(id.include_path(false), "CPU.hh");
    }

    #[test]
    fn test_shared_grouped_paths() {
        let id = identity("ModuleA", "sima", true, "ignored");
        assert_eq!(id.include_path(true), "include/sima/ModuleA.hh");
        assert_eq!(id.lib_path(true), "libs/sima/ModuleA.cc");
        assert_eq!(id.include_path(false), "sima/ModuleA.hh");
        assert_eq!(id.qualified_name(), "sima::ModuleA");
    }

    #[test]
    fn test_define_macro() {
        assert_eq!(
            define_macro("src/app_soc/include/CPU.hh"),
            "SRC_APP_SOC_INCLUDE_CPU_HH_"
        );
        assert_eq!(define_macro("include\\g\\x.hh"), "INCLUDE_G_X_HH_");
    }

    #[test]
    fn test_namespace_wrappers() {
        assert_eq!(namespace_head(""), "");
        assert_eq!(namespace_footer(""), "");
        assert_eq!(namespace_head("g"), "\nnamespace g {\n");
        assert_eq!(namespace_footer("g"), "\n}  // namespace g\n");
    }

    #[test]
    fn test_require_app() {
        assert!(identity("M", "", false, "").require_app().is_err());
        assert!(identity("M", "", true, "").require_app().is_ok());
        assert!(identity("M", "", false, "demo").require_app().is_ok());
    }

    #[test]
    fn test_inherit_app_skips_shared() {
        let mut private = identity("M", "", false, "old");
        private.inherit_app("new");
        assert_eq!(private.app(), "new");

        let mut shared = identity("S", "", true, "old");
        shared.inherit_app("new");
        assert_eq!(shared.app(), "old");
    }
}
