//! Argument handling pipeline for claude-squad.
//!
//! Turns the raw command line into exactly one [`Command`]:
//!
//! ```text
//! Raw args → Classify → Validate → Resolve → Command
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently. The
//! [`OptionRegistry`] is built once by the caller and passed by reference.

mod classifier;
mod error;
mod pipeline;
mod registry;
mod resolver;
mod validator;

pub use classifier::{classify, ParsedArgs};
pub use error::ArgError;
pub use pipeline::{decode_args, parse_command};
pub use registry::{
    option_registry, ExclusiveGroup, FlagArity, FlagCategory, OptionDef, OptionRegistry,
};
pub use resolver::{resolve, Command, InitLanguage, LaunchFlags};
pub use validator::validate;
