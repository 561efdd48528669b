use std::sync::{Arc, OnceLock};

use anyhow::{Context as _, Result};
use cmdisco_model::{CommandId, ConfigError, UnitKey, UserId};
use indexmap::IndexMap;
use log::{debug, error, info, trace};
use tokio::sync::{Mutex, OnceCell, RwLock};

use crate::config::RouterConfig;
use crate::utils::ResultExt as _;

mod argument;
pub mod check;
mod command;
mod context;
pub mod converter;
mod help;
mod platform;
mod registry;
mod unit;

#[cfg(test)]
pub(crate) mod testing;

pub use argument::{ArgValue, Args, Argument};
pub use check::Check;
pub use command::{Command, CommandBuilder};
pub use context::Context;
pub use converter::Converter;
pub use platform::{InboundMessage, Reply, UserDirectory};
pub use registry::Registry;
pub use unit::{Registrar, Unit};

/// What happened to a single inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No trigger, or nothing resembling a command name after it.
    Ignored,
    NotFound(String),
    /// The global check or one of the command's checks failed.
    Rejected,
    MissingArgument(String),
    Completed,
    /// A converter or the handler returned an error or panicked.
    Failed,
}

/// Dispatch engine. Cheap to clone, all clones share the same registry.
#[derive(Clone)]
pub struct Router(Arc<RouterInner>);

struct RouterInner {
    config: RouterConfig,
    registry: RwLock<Registry>,
    units: Mutex<IndexMap<UnitKey, Unit>>,
    global_check: Option<Check>,
    directory: Arc<dyn UserDirectory>,
    self_id: OnceLock<UserId>,
    owner: OnceCell<UserId>,
}

pub struct RouterBuilder {
    config: RouterConfig,
    directory: Arc<dyn UserDirectory>,
    global_check: Option<Check>,
}

impl RouterBuilder {
    /// Check evaluated for every resolved command before its own checks.
    pub fn global_check(mut self, check: Check) -> Self {
        self.global_check = Some(check);
        self
    }

    pub fn build(self) -> Result<Router, ConfigError> {
        let mut registry = Registry::new(self.config.default_category.clone());
        if self.config.help_command {
            registry.add_command(help::command()?, None)?;
        }
        Ok(Router(Arc::new(RouterInner {
            config: self.config,
            registry: RwLock::new(registry),
            units: Mutex::new(IndexMap::new()),
            global_check: self.global_check,
            directory: self.directory,
            self_id: OnceLock::new(),
            owner: OnceCell::new(),
        })))
    }
}

impl Router {
    pub fn builder(config: RouterConfig, directory: Arc<dyn UserDirectory>) -> RouterBuilder {
        RouterBuilder {
            config,
            directory,
            global_check: None,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.0.config
    }

    pub fn directory(&self) -> &Arc<dyn UserDirectory> {
        &self.0.directory
    }

    /// Enables the mention trigger once the bot knows who it is.
    pub fn set_self_id(&self, id: UserId) {
        if self.0.self_id.set(id).is_err() {
            debug!("Self id already known, ignoring {id}");
        }
    }

    /// Configured owner, or the application owner fetched once from the
    /// directory.
    pub async fn owner(&self) -> Result<UserId> {
        if let Some(owner) = self.0.config.owner_id {
            return Ok(owner);
        }
        self.0
            .owner
            .get_or_try_init(|| async {
                let owner = self
                    .0
                    .directory
                    .application_owner()
                    .await
                    .context("Fetching application owner")?;
                info!("Application owner: {owner}");
                Ok::<_, anyhow::Error>(owner)
            })
            .await
            .copied()
    }

    pub async fn add_command(
        &self,
        command: Command,
        unit: Option<&UnitKey>,
    ) -> Result<CommandId, ConfigError> {
        self.0.registry.write().await.add_command(command, unit)
    }

    pub async fn get_command(&self, name: &str) -> Option<Arc<Command>> {
        self.0.registry.read().await.get_command(name).cloned()
    }

    /// Snapshot of all commands, category by category in insertion order.
    pub async fn walk_commands(&self) -> Vec<Arc<Command>> {
        self.0
            .registry
            .read()
            .await
            .walk_commands()
            .cloned()
            .collect()
    }

    pub async fn categories(&self) -> Vec<(String, Vec<Arc<Command>>)> {
        self.0
            .registry
            .read()
            .await
            .categories()
            .map(|(name, commands)| (name.to_string(), commands.into_iter().cloned().collect()))
            .collect()
    }

    pub async fn load_unit(&self, unit: Unit) -> Result<(), ConfigError> {
        let mut units = self.0.units.lock().await;
        if units.contains_key(unit.key()) {
            return Err(ConfigError::UnitAlreadyLoaded(unit.key().clone()));
        }
        let added = unit.register_into(&mut *self.0.registry.write().await)?;
        info!("Loaded unit {} with {} commands", unit.key(), added);
        units.insert(unit.key().clone(), unit);
        Ok(())
    }

    /// Removes every command registered under `key`. Unknown keys are a no-op.
    pub async fn unload_unit(&self, key: &UnitKey) -> usize {
        let mut units = self.0.units.lock().await;
        units.shift_remove(key);
        let removed = self.0.registry.write().await.remove_unit(key);
        info!("Unloaded unit {key}, {removed} commands removed");
        removed
    }

    /// Removes the unit's commands and runs its registration again. When the
    /// registration fails the unit stays loaded but without commands.
    pub async fn reload_unit(&self, key: &UnitKey) -> Result<(), ConfigError> {
        let units = self.0.units.lock().await;
        let unit = units
            .get(key)
            .ok_or_else(|| ConfigError::UnknownUnit(key.clone()))?;
        let mut registry = self.0.registry.write().await;
        let removed = registry.remove_unit(key);
        match unit.register_into(&mut registry) {
            Ok(added) => {
                info!("Reloaded unit {key}: {removed} commands removed, {added} added");
                Ok(())
            }
            Err(e) => {
                error!("Reload of unit {key} failed, its commands stay unregistered: {e}");
                Err(e)
            }
        }
    }

    pub async fn reload_units(&self) -> Vec<(UnitKey, Result<(), ConfigError>)> {
        let mut results = Vec::new();
        for key in self.unit_keys().await {
            let result = self.reload_unit(&key).await;
            results.push((key, result));
        }
        results
    }

    pub async fn unit_keys(&self) -> Vec<UnitKey> {
        self.0.units.lock().await.keys().cloned().collect()
    }

    /// Loaded units with the number of commands each currently provides.
    pub async fn unit_sizes(&self) -> Vec<(UnitKey, usize)> {
        let keys = self.unit_keys().await;
        let registry = self.0.registry.read().await;
        keys.into_iter()
            .map(|key| {
                let size = registry.unit_size(&key);
                (key, size)
            })
            .collect()
    }

    pub async fn process_input(&self, message: InboundMessage) -> Outcome {
        let Some(rest) = self.strip_trigger(&message.content) else {
            return Outcome::Ignored;
        };
        let Some(invocation) = cmdparse::parse_invocation(rest) else {
            trace!("No command name after trigger: {:?}", message.content);
            return Outcome::Ignored;
        };
        let name = invocation.name.to_string();
        let tail = invocation.tail.map(String::from);

        let command = self.get_command(&name).await;
        let ctx = Context::new(self.clone(), message, command.clone());
        let Some(command) = command else {
            debug!("{} called unknown command {name}", ctx.author());
            if self.0.config.reply_on_command_not_found {
                ctx.send("Command not found").await.print_err();
            }
            return Outcome::NotFound(name);
        };

        if let Some(check) = &self.0.global_check {
            if !check.evaluate(&ctx).await {
                debug!("{} rejected by global check for {}", ctx.author(), name);
                return Outcome::Rejected;
            }
        }
        debug!("{} invoked {} with {:?}", ctx.author(), command.name(), tail);
        command.run(ctx, tail.as_deref()).await
    }

    fn strip_trigger<'a>(&self, text: &'a str) -> Option<&'a str> {
        if let Some(rest) = cmdparse::strip_prefix(text, &self.0.config.prefix) {
            return Some(rest);
        }
        if !self.0.config.mention_trigger {
            return None;
        }
        let self_id = self.0.self_id.get()?;
        cmdparse::strip_mention(text, self_id.get())
    }
}
