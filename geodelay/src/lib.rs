//! Emulate inter-city latency across a fleet of machines.
//!
//! Machines are assigned to cities round-robin over a latency table, then every machine gets
//! one `tcset` rule per machine located in another city. The rules are rendered into a
//! single shell script holding one block per host.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::{io, path::PathBuf};

pub use geodelay_script::{self as script, ScriptEmitter, Template};
pub use geodelay_sim::{
    self as sim, LatencyRecord, LatencyTable, LookupError, Machine, Rule, RuleOptions, RuleSet,
};

pub mod input;
mod pipeline;

pub use pipeline::{Fleet, Pipeline};

/// Failure of a geodelay run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error(transparent)]
    Sim(#[from] sim::Error),
    #[error(transparent)]
    Script(#[from] script::Error),
    #[error("failed to apply rule")]
    Command(#[from] sim::command::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The messages of `err` and of each of its sources, outermost first.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }

    chain
}
