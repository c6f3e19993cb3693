//! Instance records and the schema-driven constructor builder.
//!
//! An [`Instance`] is a fixed `{name, host}` pair plus an open-ended map of
//! string attributes. Deployment scripts that want every instance to carry
//! the same attributes declare an [`InstanceSchema`] once and build
//! instances through the closure returned by [`Instance::with_params`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::InstanceError;

/// Extra named attributes attached to an instance.
pub type Params = BTreeMap<String, String>;

/// One deployable service target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    name: String,
    host: String,
    params: Params,
}

impl Instance {
    /// Construct an instance accepting any extra attributes.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::InvalidName`] if `name` cannot be used as a
    /// task name on the command line.
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        params: Params,
    ) -> Result<Self, InstanceError> {
        let name = name.into();
        validate_instance_name(&name)?;
        Ok(Self {
            name,
            host: host.into(),
            params,
        })
    }

    /// Build a constructor that validates attributes against `params`.
    ///
    /// Every declared parameter takes the caller's override when present and
    /// its default otherwise. Missing required parameters and overrides that
    /// were never declared are rejected.
    pub fn with_params<I, K>(
        params: I,
    ) -> impl Fn(&str, &str, Params) -> Result<Instance, InstanceError>
    where
        I: IntoIterator<Item = (K, ParamSpec)>,
        K: Into<String>,
    {
        params.into_iter().collect::<InstanceSchema>().into_constructor()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Look up an extra attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Validates that `name` is usable as a selector task token.
///
/// # Errors
///
/// Returns [`InstanceError::InvalidName`] for empty names, names starting
/// with punctuation, or names containing characters outside
/// `[A-Za-z0-9_.-]`.
pub fn validate_instance_name(name: &str) -> Result<(), InstanceError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(InstanceError::InvalidName(name.to_string()))
    }
}

// ── Schema ───────────────────────────────────────────────────────────────────

/// Declaration of a single schema parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
    /// Callers must supply a value.
    Required,
    /// Used when the caller supplies nothing.
    Default(String),
}

impl ParamSpec {
    /// Shorthand for `ParamSpec::Default(value.into())`.
    pub fn default_value(value: impl Into<String>) -> Self {
        Self::Default(value.into())
    }
}

/// Parameter schema shared by a family of instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceSchema {
    params: BTreeMap<String, ParamSpec>,
}

impl InstanceSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter callers must supply.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.insert(name.into(), ParamSpec::Required);
        self
    }

    /// Declare a parameter with a default value.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.params
            .insert(name.into(), ParamSpec::Default(default.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Construct an instance, filling defaults and validating overrides.
    ///
    /// # Errors
    ///
    /// - [`InstanceError::UnexpectedParam`] when `overrides` holds keys the
    ///   schema does not declare (all of them, sorted).
    /// - [`InstanceError::MissingParam`] when required parameters have no
    ///   override (all of them, sorted).
    /// - [`InstanceError::InvalidName`] from [`Instance::new`].
    pub fn build(
        &self,
        name: &str,
        host: &str,
        mut overrides: Params,
    ) -> Result<Instance, InstanceError> {
        let unexpected: Vec<String> = overrides
            .keys()
            .filter(|key| !self.params.contains_key(*key))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(InstanceError::UnexpectedParam(unexpected));
        }

        let mut params = Params::new();
        let mut missing = Vec::new();
        for (key, spec) in &self.params {
            let value = match (overrides.remove(key), spec) {
                (Some(value), _) => value,
                (None, ParamSpec::Default(default)) => default.clone(),
                (None, ParamSpec::Required) => {
                    missing.push(key.clone());
                    continue;
                }
            };
            params.insert(key.clone(), value);
        }
        if !missing.is_empty() {
            return Err(InstanceError::MissingParam(missing));
        }

        Instance::new(name, host, params)
    }

    /// Turn the schema into a reusable constructor closure.
    pub fn into_constructor(
        self,
    ) -> impl Fn(&str, &str, Params) -> Result<Instance, InstanceError> {
        move |name: &str, host: &str, overrides: Params| self.build(name, host, overrides)
    }
}

impl<K: Into<String>> FromIterator<(K, ParamSpec)> for InstanceSchema {
    fn from_iter<T: IntoIterator<Item = (K, ParamSpec)>>(iter: T) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
