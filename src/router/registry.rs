use std::sync::Arc;

use cmdisco_model::{CommandId, ConfigError, UnitKey};
use indexmap::IndexMap;
use log::debug;

use super::Command;

#[derive(Clone)]
struct Entry {
    id: CommandId,
    command: Arc<Command>,
}

/// Commands grouped by category in registration order, plus the commands
/// each unit contributed.
pub struct Registry {
    default_category: String,
    categories: IndexMap<String, Vec<Entry>>,
    units: IndexMap<UnitKey, Vec<CommandId>>,
    next_id: CommandId,
}

impl Registry {
    pub fn new(default_category: impl Into<String>) -> Self {
        Self {
            default_category: default_category.into(),
            categories: IndexMap::new(),
            units: IndexMap::new(),
            next_id: CommandId::first(),
        }
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Fails when the command's name or one of its aliases is already taken
    /// by a name or alias of a registered command.
    pub fn add_command(
        &mut self,
        command: Command,
        unit: Option<&UnitKey>,
    ) -> Result<CommandId, ConfigError> {
        for name in command.names() {
            if let Some(existing) = self.get_command(name) {
                return Err(ConfigError::DuplicateName {
                    name: name.to_string(),
                    existing: existing.name().to_string(),
                });
            }
        }

        let id = self.next_id;
        self.next_id = id.next();
        let category = command
            .category()
            .unwrap_or(self.default_category.as_str())
            .to_string();
        debug!("Registering {} {} in {}", id, command.name(), category);
        self.categories.entry(category).or_default().push(Entry {
            id,
            command: Arc::new(command),
        });
        if let Some(unit) = unit {
            self.units.entry(unit.clone()).or_default().push(id);
        }
        Ok(id)
    }

    /// Finds a command by its name or any of its aliases.
    pub fn get_command(&self, name: &str) -> Option<&Arc<Command>> {
        self.walk_commands().find(|c| c.matches(name))
    }

    pub fn walk_commands(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.categories.values().flatten().map(|e| &e.command)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, Vec<&Arc<Command>>)> {
        self.categories.iter().map(|(name, entries)| {
            (
                name.as_str(),
                entries.iter().map(|e| &e.command).collect(),
            )
        })
    }

    pub fn unit_size(&self, unit: &UnitKey) -> usize {
        self.units.get(unit).map(Vec::len).unwrap_or_default()
    }

    /// Removes the commands registered under `unit` by their registration
    /// ids, so a same-named command registered elsewhere stays. Emptied
    /// categories keep their place. Returns the number of commands removed.
    pub fn remove_unit(&mut self, unit: &UnitKey) -> usize {
        let Some(ids) = self.units.shift_remove(unit) else {
            return 0;
        };
        let before = self.len();
        for entries in self.categories.values_mut() {
            entries.retain(|e| !ids.contains(&e.id));
        }
        before - self.len()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
