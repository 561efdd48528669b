use std::fmt::Debug;

use cmdisco_model::Author;
use cmdparse::Slot;

use super::Converter;

/// Formal parameter of a command.
#[derive(Clone)]
pub struct Argument {
    name: String,
    optional: bool,
    combined: bool,
    converter: Option<Converter>,
}

impl Argument {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            combined: false,
            converter: None,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }

    /// Takes the rest of the message as one value, spacing included. Only the
    /// last argument may be combined.
    pub fn combined(mut self) -> Self {
        self.combined = true;
        self
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_combined(&self) -> bool {
        self.combined
    }

    pub fn get_converter(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }

    /// `<name>` when required, `[name]` when optional, `...` marks combined.
    pub fn syntax(&self) -> String {
        let dots = if self.combined { "..." } else { "" };
        if self.optional {
            format!("[{}{}]", self.name, dots)
        } else {
            format!("<{}{}>", self.name, dots)
        }
    }

    pub(crate) fn slot(&self) -> Slot {
        Slot {
            optional: self.optional,
            combined: self.combined,
        }
    }
}

impl Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("optional", &self.optional)
            .field("combined", &self.combined)
            .field("converter", &self.converter.is_some())
            .finish()
    }
}

/// Value of one supplied argument after conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
    User(Author),
    /// The converter ran but found nothing for the given text.
    NotFound,
}

/// Positional argument values passed to a handler. Positions past the end
/// were not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args(Vec<ArgValue>);

impl Args {
    pub fn new(values: Vec<ArgValue>) -> Self {
        Args(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ArgValue> {
        self.0.get(index)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        match self.get(index)? {
            ArgValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self, index: usize) -> Option<i64> {
        match self.get(index)? {
            ArgValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, index: usize) -> Option<&Author> {
        match self.get(index)? {
            ArgValue::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgValue> {
        self.0.iter()
    }
}
