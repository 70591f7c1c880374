//! Turns a [`RuleSet`](geodelay_sim::RuleSet) into a shell script with one block per host.
//!
//! Blocks are rendered from a [`Template`] in rule set order, so two runs over the same input
//! produce byte-identical scripts.

use std::io;

use geodelay_sim::LookupError;

mod emit;
mod template;

pub use emit::{write_script, ScriptEmitter};
pub use template::{Block, Template, TemplateError};

/// Failure to render or write a script.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
