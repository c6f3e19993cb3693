//! Inventory file schema: instance parameter declarations and instances.
//!
//! ```yaml
//! params:
//!   required: [home]
//!   defaults: { tier: standard }
//! instances:
//!   - name: prod
//!     host: root@prod.example.com
//!     home: /srv/app
//! ```

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use povfab_common::{Instance, InstanceSchema, ParamSpec, Params, Registry, SelectorTask};
use serde::Deserialize;

use crate::domain::error::ConfigError;

/// Parsed inventory file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Inventory {
    /// Schema every instance must satisfy. Absent ⇒ free-form attributes.
    #[serde(default)]
    pub params: Option<ParamsSection>,
    #[serde(default)]
    pub instances: Vec<InstanceEntry>,
}

/// Declared instance parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsSection {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, Scalar>,
}

/// One `instances:` entry; keys besides `name` and `host` are attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceEntry {
    pub name: String,
    pub host: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Scalar>,
}

/// Scalar YAML value accepted as an attribute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl Inventory {
    /// Parse inventory YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or contains unknown
    /// top-level keys or non-scalar attributes.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid inventory")
    }

    /// The declared schema, if the inventory has a `params` section.
    #[must_use]
    pub fn schema(&self) -> Option<InstanceSchema> {
        let section = self.params.as_ref()?;
        let required = section
            .required
            .iter()
            .map(|name| (name.clone(), ParamSpec::Required));
        let defaults = section
            .defaults
            .iter()
            .map(|(name, value)| (name.clone(), ParamSpec::Default(value.to_string())));
        Some(defaults.chain(required).collect())
    }

    /// Construct every instance, validating attributes against the schema.
    ///
    /// # Errors
    ///
    /// Returns the first instance that fails to construct, naming it.
    pub fn build_instances(&self) -> Result<Vec<Instance>> {
        let schema = self.schema();
        self.instances
            .iter()
            .map(|entry| {
                let attributes: Params = entry
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_string()))
                    .collect();
                let built = match &schema {
                    Some(schema) => schema.build(&entry.name, &entry.host, attributes),
                    None => Instance::new(entry.name.as_str(), entry.host.as_str(), attributes),
                };
                built.with_context(|| format!("invalid instance '{}'", entry.name))
            })
            .collect()
    }

    /// Register every instance into a fresh registry.
    ///
    /// `reserved` lists names that would shadow built-in commands.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid instances, reserved names and duplicates.
    pub fn into_registry(
        self,
        program: &str,
        reserved: &[&str],
    ) -> Result<(Registry, Vec<SelectorTask>)> {
        let mut registry = Registry::for_program(program);
        let mut tasks = Vec::with_capacity(self.instances.len());
        for instance in self.build_instances()? {
            if reserved.contains(&instance.name()) {
                return Err(ConfigError::ReservedInstanceName(instance.name().to_string()).into());
            }
            tasks.push(registry.register(instance)?);
        }
        Ok((registry, tasks))
    }
}
