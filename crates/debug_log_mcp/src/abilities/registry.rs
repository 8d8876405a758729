use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::abilities::{Ability, AbilityDescriptor, Caller};
use crate::errors::{AbilityError, AbilityResult};

/// Registry mapping ability names to their handlers
#[derive(Clone, Default)]
pub struct AbilityRegistry {
    abilities: BTreeMap<String, Arc<dyn Ability>>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ability; names are unique
    pub fn register(&mut self, ability: Arc<dyn Ability>) -> AbilityResult<()> {
        let name = ability.descriptor().name.clone();
        if self.abilities.contains_key(&name) {
            return Err(AbilityError::DuplicateAbility { name });
        }
        tracing::debug!("Registered ability {}", name);
        self.abilities.insert(name, ability);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Ability>> {
        self.abilities.get(name)
    }

    /// Descriptors of every registered ability, ordered by name
    pub fn descriptors(&self) -> Vec<&AbilityDescriptor> {
        self.abilities.values().map(|a| a.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Look up `name`, check the caller's permission, then execute
    pub async fn dispatch(&self, name: &str, caller: &Caller, input: Value) -> AbilityResult<Value> {
        let ability = self.get(name).ok_or_else(|| AbilityError::UnknownAbility {
            name: name.to_string(),
        })?;

        authorize(ability.descriptor(), caller)?;

        tracing::debug!("Executing ability {}", name);
        ability.execute(input).await
    }
}

fn authorize(descriptor: &AbilityDescriptor, caller: &Caller) -> AbilityResult<()> {
    if caller.can(descriptor.capability) {
        return Ok(());
    }
    tracing::warn!(
        "Denied {}: caller lacks capability {}",
        descriptor.name,
        descriptor.capability
    );
    Err(AbilityError::PermissionDenied {
        name: descriptor.name.clone(),
        capability: descriptor.capability.to_string(),
    })
}
