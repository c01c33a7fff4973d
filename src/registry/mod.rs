//! Remote component registry
//!
//! This module handles:
//! - Registry wire types (manifest and per-component bundles)
//! - Filtering the manifest down to installable component names
//! - Categorizing names for the summary view
//!
//! The HTTP side lives in [`client`].

pub mod client;

pub use client::{HttpRegistry, RegistrySource};

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the registry manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub name: String,
}

/// The registry index, fetched once per session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryManifest {
    pub items: Vec<RegistryItem>,
}

impl RegistryManifest {
    /// Installable component names, in manifest order.
    ///
    /// Drops demos, the index entry and theme variants, and collapses duplicates
    /// keeping the first occurrence.
    pub fn component_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.name.as_str())
            .filter(|name| !is_reserved(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

fn is_reserved(name: &str) -> bool {
    name == "index" || name.ends_with("-demo") || name.starts_with("theme-")
}

/// One file of a component bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFile {
    pub path: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ComponentFile {
    /// Last path segment, used as the diff label
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// A component bundle, fetched on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDetails {
    pub name: String,
    #[serde(default)]
    pub files: Vec<ComponentFile>,
}

/// Summary grouping of registry names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Component,
    Hook,
    Icon,
    Theme,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Component,
        Category::Hook,
        Category::Icon,
        Category::Theme,
    ];

    pub fn of(name: &str) -> Self {
        if name.starts_with("use-") {
            Category::Hook
        } else if name.starts_with("icon-") || name.ends_with("-icon") {
            Category::Icon
        } else if name == "theme" {
            Category::Theme
        } else {
            Category::Component
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Component => "Components",
            Category::Hook => "Hooks",
            Category::Icon => "Icons",
            Category::Theme => "Theme",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category name counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub components: usize,
    pub hooks: usize,
    pub icons: usize,
    pub theme: usize,
}

impl CategoryCounts {
    pub fn tally<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let mut counts = Self::default();
        for name in names {
            *counts.slot(Category::of(name)) += 1;
        }
        counts
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Component => self.components,
            Category::Hook => self.hooks,
            Category::Icon => self.icons,
            Category::Theme => self.theme,
        }
    }

    pub fn total(&self) -> usize {
        self.components + self.hooks + self.icons + self.theme
    }

    fn slot(&mut self, category: Category) -> &mut usize {
        match category {
            Category::Component => &mut self.components,
            Category::Hook => &mut self.hooks,
            Category::Icon => &mut self.icons,
            Category::Theme => &mut self.theme,
        }
    }
}
