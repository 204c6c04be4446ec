#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod cli;
pub mod error;

mod builder;
mod escape;
mod json;
mod serializer;
mod value;

pub use builder::{Options, build};
pub use json::conditions_from_json;
pub use value::{ConditionSet, ConditionValue, DocumentId, RangeSpec};
