use std::sync::Arc;

use cmdisco_model::{CommandId, ConfigError, UnitKey};

use super::{Command, Registry};

type RegisterFn = dyn Fn(&mut Registrar<'_>) -> Result<(), ConfigError> + Send + Sync;

/// A group of commands registered by one function and reloaded together.
#[derive(Clone)]
pub struct Unit {
    key: UnitKey,
    register: Arc<RegisterFn>,
}

impl Unit {
    pub fn new<F>(key: impl Into<UnitKey>, register: F) -> Self
    where
        F: Fn(&mut Registrar<'_>) -> Result<(), ConfigError> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            register: Arc::new(register),
        }
    }

    pub fn key(&self) -> &UnitKey {
        &self.key
    }

    /// Runs the registration function. On failure the commands it managed to
    /// add are removed again, leaving no trace of the unit in the registry.
    pub(crate) fn register_into(&self, registry: &mut Registry) -> Result<usize, ConfigError> {
        let mut registrar = Registrar {
            registry: &mut *registry,
            unit: &self.key,
        };
        if let Err(e) = (self.register)(&mut registrar) {
            registry.remove_unit(&self.key);
            return Err(e);
        }
        Ok(registry.unit_size(&self.key))
    }
}

/// Registry view handed to a unit's registration function. Every command
/// added through it is recorded under the unit.
pub struct Registrar<'a> {
    registry: &'a mut Registry,
    unit: &'a UnitKey,
}

impl Registrar<'_> {
    pub fn add_command(&mut self, command: Command) -> Result<CommandId, ConfigError> {
        self.registry.add_command(command, Some(self.unit))
    }

    pub fn unit(&self) -> &UnitKey {
        self.unit
    }

    pub fn default_category(&self) -> &str {
        self.registry.default_category()
    }
}
