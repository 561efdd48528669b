use thiserror::Error;

use crate::UnitKey;

/// Mistakes in command setup. Raised at registration time and never during
/// dispatch of a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Command `{command}`: combined argument `{argument}` should be last")]
    CombinedNotLast { command: String, argument: String },

    #[error("Command `{command}`: required argument `{argument}` follows an optional one")]
    RequiredAfterOptional { command: String, argument: String },

    #[error("Command `{command}` has no handler")]
    MissingHandler { command: String },

    #[error("Name `{name}` is already used by command `{existing}`")]
    DuplicateName { name: String, existing: String },

    #[error("Unit `{0}` is already loaded")]
    UnitAlreadyLoaded(UnitKey),

    #[error("Unit `{0}` is not loaded")]
    UnknownUnit(UnitKey),
}
