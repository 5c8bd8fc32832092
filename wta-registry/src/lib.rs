//! A generic named-provider registry.
//!
//! A [`Registry`] maps a string key to a zero-argument factory producing a
//! `T` (typically a `Box<dyn SomeTrait>`). Per the design note in the
//! simulation's specification, this is a single structure the host builds
//! at startup and passes into the parts that need it — never a
//! process-wide mutable singleton, so a registry is always explicit
//! collaborator state, not ambient global state.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no provider named '{0}' is registered and no default is set")]
    NotFound(String),
}

/// A named-provider registry over factories producing `T`.
pub struct Registry<T> {
    factories: HashMap<String, Box<dyn Fn() -> T>>,
    default: Option<String>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Registry {
            factories: HashMap::new(),
            default: None,
        }
    }

    /// Registers `factory` under `name`, overwriting any prior registration
    /// for that name.
    pub fn register(&mut self, name: impl Into<String>, factory: impl Fn() -> T + 'static) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Marks `name` as the provider `default()` falls back to. Does not
    /// require `name` to already be registered, so registration order is
    /// not significant.
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default = Some(name.into());
    }

    /// Looks up the provider named `name` and invokes its factory.
    pub fn get(&self, name: &str) -> Result<T, RegistryError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Invokes the default provider's factory.
    pub fn default_provider(&self) -> Result<T, RegistryError> {
        match &self.default {
            Some(name) => self.get(name),
            None => Err(RegistryError::NotFound("<no default set>".to_string())),
        }
    }

    /// Names of every registered provider, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry::new()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.factories.len())
            .field("default", &self.default)
            .finish()
    }
}
