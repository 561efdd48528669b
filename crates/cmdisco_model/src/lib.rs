use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod error;

pub use error::ConfigError;

/// Platform identity of a message author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        UserId(value)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error)]
#[error("Invalid user id: \"{0}\"")]
pub struct InvalidUserId(String);

impl std::str::FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u64>() {
            Ok(0) | Err(_) => Err(InvalidUserId(s.to_string())),
            Ok(id) => Ok(UserId(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Registration handle of a command. Assigned by the registry, never reused.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct CommandId(u64);

impl CommandId {
    pub fn first() -> Self {
        CommandId(1)
    }

    pub fn next(self) -> Self {
        CommandId(self.0 + 1)
    }
}

impl Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Name of a unit of commands that is loaded, unloaded and reloaded together.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct UnitKey(String);

impl UnitKey {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for UnitKey {
    fn from(value: String) -> Self {
        UnitKey(value)
    }
}

impl From<&str> for UnitKey {
    fn from(value: &str) -> Self {
        UnitKey(String::from(value))
    }
}

impl Display for UnitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
