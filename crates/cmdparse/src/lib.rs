//! Text side of command dispatch: recognizing a trigger, splitting the
//! invocation into a command name and a raw argument tail, and binding the
//! tail to a command's argument shape.

mod shape;
mod tokenize;
mod trigger;

pub use shape::{Missing, Shape, ShapeError, Slot};
pub use tokenize::{tokenize, Token};
pub use trigger::{parse_invocation, strip_mention, strip_prefix, Invocation};
