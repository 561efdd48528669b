use cmdisco_model::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub discord_bot_token: String,

    #[serde(default)]
    pub router: RouterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Text a message has to start with to be treated as a command.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Also accept a mention of the bot in place of the prefix.
    #[serde(default = "default_true")]
    pub mention_trigger: bool,

    /// Reply with "Command not found" to unknown commands. Noisy in shared
    /// channels where several bots use the same prefix.
    #[serde(default)]
    pub reply_on_command_not_found: bool,

    /// Category of commands registered without one.
    #[serde(default = "default_category")]
    pub default_category: String,

    #[serde(default = "default_true")]
    pub help_command: bool,

    /// Owner for the `is_owner` check. Fetched from the platform when not set.
    #[serde(default)]
    pub owner_id: Option<UserId>,
}

fn default_prefix() -> String {
    "!".into()
}

fn default_category() -> String {
    "default".into()
}

fn default_true() -> bool {
    true
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            mention_trigger: default_true(),
            reply_on_command_not_found: false,
            default_category: default_category(),
            help_command: default_true(),
            owner_id: None,
        }
    }
}

impl RouterConfig {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }
}
