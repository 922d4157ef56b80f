//! # Manager
//!
//! A [`Manager`] owns one registry snapshot together with everything derived from it: the
//! synonym index, compiled identifier patterns, and the default converter records.  Derived
//! state is computed on first use and thrown away by every mutation, so a read after a write
//! never sees stale data.  Independent managers share nothing.
//!
//! The manager is single-threaded: caches use `OnceCell`/`RefCell`.  A concurrent host must put
//! it behind its own lock.
//!
//! Lookups are split across modules by concern:
//!
//! - `normalize`: prefixes and CURIEs;
//! - `validate`: identifier patterns and registry lint;
//! - `resolve`: provider URIs;
//! - `converter`: bulk records and the converter.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use crate::accumulator::Record;
use crate::config::Config;
use crate::errors::RegistryError;
use crate::index::RegistryIndex;
use crate::metaregistry::Metaregistry;
use crate::norm::norm;
use crate::registry::Registry;
use crate::resource::Resource;

/// Owner of a registry snapshot and its derived caches.
#[derive(Debug, Default)]
pub struct Manager {
    registry: Registry,
    metaregistry: Metaregistry,
    config: Config,
    index: OnceCell<RegistryIndex>,
    pub(crate) patterns: RefCell<HashMap<String, Option<Regex>>>,
    pub(crate) records: OnceCell<Vec<Record>>,
}

impl Manager {
    /// Creates a manager with the built-in metaregistry and default configuration.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            ..Default::default()
        }
    }

    /// Creates a manager from all of its parts.
    ///
    /// When `config.strict` is set the synonym index is built immediately and any conflict is
    /// returned as an error.
    pub fn with_parts(
        registry: Registry,
        metaregistry: Metaregistry,
        config: Config,
    ) -> Result<Self, RegistryError> {
        let manager = Self {
            registry,
            metaregistry,
            config,
            ..Default::default()
        };
        if manager.config.strict {
            let index = RegistryIndex::build(&manager.registry, true)?;
            let _ = manager.index.set(index);
        }
        Ok(manager)
    }

    /// Loads a registry file and optional metaregistry and config files.
    pub fn load(
        registry: impl AsRef<Path>,
        metaregistry: Option<&Path>,
        config: Option<&Path>,
    ) -> Result<Self, RegistryError> {
        let registry = Registry::load(registry)?;
        let metaregistry = match metaregistry {
            Some(path) => Metaregistry::load(path)?,
            None => Metaregistry::builtin(),
        };
        let config = match config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        Self::with_parts(registry, metaregistry, config)
    }

    /// The registry snapshot.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The external registry descriptors.
    pub fn metaregistry(&self) -> &Metaregistry {
        &self.metaregistry
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The synonym index, built on first use.
    pub fn index(&self) -> &RegistryIndex {
        self.index.get_or_init(|| {
            // Non-strict builds record conflicts instead of failing.
            RegistryIndex::build(&self.registry, false).unwrap_or_default()
        })
    }

    /// Drops every derived cache.
    pub fn invalidate(&mut self) {
        self.index = OnceCell::new();
        self.patterns.get_mut().clear();
        self.records = OnceCell::new();
    }

    /// Replaces the configuration and drops derived caches.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        self.invalidate();
    }

    /// Adds a new resource.
    ///
    /// The resource is rejected if its prefix is empty or contains a colon, or if its prefix or
    /// any synonym normalizes to a key already owned by a different resource.
    pub fn add_resource(&mut self, resource: Resource) -> Result<(), RegistryError> {
        if resource.prefix.is_empty() || resource.prefix.contains(':') {
            return Err(RegistryError::InvalidResource {
                prefix: resource.prefix,
                reason: "prefix must be non-empty and must not contain ':'".to_string(),
            });
        }
        if let Some(existing) = self.index().normalize_prefix(&resource.prefix) {
            return Err(RegistryError::DuplicatePrefix {
                prefix: resource.prefix.clone(),
                existing: existing.to_string(),
            });
        }
        for synonym in &resource.synonyms {
            if norm(synonym).is_empty() {
                continue;
            }
            if let Some(existing) = self.index().normalize_prefix(synonym) {
                return Err(RegistryError::SynonymConflict {
                    key: synonym.clone(),
                    existing: existing.to_string(),
                    incoming: resource.prefix.clone(),
                });
            }
        }
        tracing::debug!(prefix = %resource.prefix, "adding resource");
        self.registry.insert(resource);
        self.invalidate();
        Ok(())
    }

    /// Removes a resource by canonical prefix.
    pub fn remove_resource(&mut self, prefix: &str) -> Option<Resource> {
        let removed = self.registry.remove(prefix);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// The resource for any prefix-like string.
    pub fn get_resource(&self, prefix: &str) -> Option<&Resource> {
        let canonical = self.index().normalize_prefix(prefix)?;
        self.registry.get(canonical)
    }

    /// The homepage, falling back to the homepage of the resource this one provides.
    pub fn get_homepage(&self, prefix: &str) -> Option<String> {
        let resource = self.get_resource(prefix)?;
        if let Some(homepage) = resource.get_homepage() {
            return Some(homepage.to_string());
        }
        let target = self.registry.get(resource.provides.as_deref()?)?;
        target.get_homepage().map(str::to_string)
    }

    /// The display name of any prefix-like string.
    pub fn get_name(&self, prefix: &str) -> Option<String> {
        self.get_resource(prefix)?.get_name().map(str::to_string)
    }

    /// The cleaned pattern of any prefix-like string.
    pub fn get_pattern(&self, prefix: &str) -> Option<String> {
        self.get_resource(prefix)?.get_pattern()
    }

    /// Whether the resource for any prefix-like string is deprecated; `None` if unknown.
    pub fn is_deprecated(&self, prefix: &str) -> Option<bool> {
        Some(self.get_resource(prefix)?.is_deprecated())
    }
}
