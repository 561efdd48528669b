pub mod config;
pub mod discord;
pub mod logging;
pub mod router;
pub mod store;
pub mod units;
pub mod utils;

pub use cmdisco_model::{Author, CommandId, ConfigError, UnitKey, UserId};
pub use config::{Config, RouterConfig};
pub use router::{
    Argument, ArgValue, Args, Check, Command, Context, Converter, InboundMessage, Outcome,
    Registrar, Registry, Reply, Router, Unit, UserDirectory,
};
