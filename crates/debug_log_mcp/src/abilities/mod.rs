//! # Abilities
//!
//! Named, schema-described operations and the registry that dispatches them.
//!
//! ## Modules
//! - `registry`: Name-to-handler map with the permission check in front of every call
//! - `debug_log`: Read, clear and inspect the configured debug log

pub mod debug_log;
pub mod registry;

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use rmcp::schemars::{self, JsonSchema};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::errors::{AbilityError, AbilityResult};

pub use registry::AbilityRegistry;

/// Permission an ability requires from its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read the log and its metadata
    ViewLog,
    /// Modify or clear the log
    ManageLog,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewLog => "view_log",
            Capability::ManageLog => "manage_log",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity on whose behalf an ability runs
#[derive(Debug, Clone, Default)]
pub struct Caller {
    capabilities: HashSet<Capability>,
}

impl Caller {
    pub fn new(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Static description of an ability, published in the ability catalog
#[derive(Debug, Clone, Serialize)]
pub struct AbilityDescriptor {
    pub name: String,
    pub label: String,
    pub description: String,
    pub capability: Capability,
    pub input_schema: Value,
}

impl AbilityDescriptor {
    pub fn new<I: JsonSchema>(
        name: &str,
        label: &str,
        description: &str,
        capability: Capability,
    ) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            capability,
            input_schema: input_schema::<I>(),
        }
    }
}

/// A named operation the registry can dispatch
#[async_trait]
pub trait Ability: Send + Sync {
    fn descriptor(&self) -> &AbilityDescriptor;

    /// Run the ability; permission has already been checked by the dispatcher
    async fn execute(&self, input: Value) -> AbilityResult<Value>;
}

/// JSON Schema of an ability's input type
pub fn input_schema<I: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(I)).unwrap_or(Value::Null)
}

/// Deserialize ability input; `null` means every field takes its default
pub fn parse_input<I>(name: &str, input: Value) -> AbilityResult<I>
where
    I: DeserializeOwned + Default,
{
    if input.is_null() {
        return Ok(I::default());
    }
    serde_json::from_value(input).map_err(|e| AbilityError::InvalidInput {
        name: name.to_string(),
        message: e.to_string(),
    })
}

pub fn to_output<O: Serialize>(name: &str, output: &O) -> AbilityResult<Value> {
    serde_json::to_value(output).map_err(|e| AbilityError::Serialization {
        name: name.to_string(),
        message: e.to_string(),
    })
}
