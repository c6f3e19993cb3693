//! Instance registry and selector tasks.
//!
//! The registry is owned by whoever drives an invocation (the `povfab` CLI
//! context) and holds at most one "current instance" at a time.

use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::instance::Instance;

/// Program name used in the example invocation of selection errors.
pub const DEFAULT_PROGRAM: &str = "povfab";

/// Zero-argument task that records its instance as the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorTask {
    name: String,
    help: String,
}

impl SelectorTask {
    fn for_instance(name: &str) -> Self {
        Self {
            name: name.to_string(),
            help: format!("Select the '{name}' instance for subsequent tasks"),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Record this task's instance as current in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] if `registry` is not the registry
    /// the task was generated from.
    pub fn run(&self, registry: &mut Registry) -> Result<(), RegistryError> {
        registry.set_current(&self.name)
    }
}

/// Mapping from instance name to instance, plus the current selection.
#[derive(Debug, Clone)]
pub struct Registry {
    program: String,
    instances: BTreeMap<String, Instance>,
    current: Option<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::for_program(DEFAULT_PROGRAM)
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose guidance messages name `program`.
    pub fn for_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            instances: BTreeMap::new(),
            current: None,
        }
    }

    /// Add `instance` and return its selector task.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if an instance with the same name
    /// is already registered. The registry is left unchanged.
    pub fn register(&mut self, instance: Instance) -> Result<SelectorTask, RegistryError> {
        let name = instance.name().to_string();
        if self.instances.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        let task = SelectorTask::for_instance(&name);
        self.instances.insert(name, instance);
        Ok(task)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.instances.get(name)
    }

    /// Registered instance names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.instances.keys().map(String::as_str).collect()
    }

    /// Registered instances in name order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The instance name recorded by the last selector task, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Record `name` as the current instance.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] if `name` is not registered.
    pub fn set_current(&mut self, name: &str) -> Result<(), RegistryError> {
        if !self.instances.contains_key(name) {
            return Err(self.unknown(name, ""));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Resolve the instance a `command` should act on.
    ///
    /// `explicit` wins over the recorded current instance.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NoInstances`] when nothing is registered.
    /// - [`RegistryError::NotSelected`] when neither `explicit` nor a current
    ///   instance is available.
    /// - [`RegistryError::Unknown`] when the resolved name is not registered.
    pub fn select(&self, explicit: Option<&str>, command: &str) -> Result<&Instance, RegistryError> {
        if self.instances.is_empty() {
            return Err(RegistryError::NoInstances);
        }
        let Some(name) = explicit.or(self.current.as_deref()) else {
            return Err(RegistryError::NotSelected {
                known: self.known(),
                example: self.example(command),
            });
        };
        self.instances
            .get(name)
            .ok_or_else(|| self.unknown(name, command))
    }

    fn known(&self) -> Vec<String> {
        self.instances.keys().cloned().collect()
    }

    fn unknown(&self, name: &str, command: &str) -> RegistryError {
        RegistryError::Unknown {
            name: name.to_string(),
            known: self.known(),
            example: self.example(command),
        }
    }

    fn example(&self, command: &str) -> String {
        let command = if command.is_empty() { "<command>" } else { command };
        self.instances
            .keys()
            .map(|name| format!("  {} {name} {command}", self.program))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
