//! Core of geodelay: assigns every machine of a fleet to a city and derives the `tcset`
//! rules each machine needs so that traffic towards machines in other cities is delayed.
//!
//! The pipeline is purely in-memory and synchronous:
//!
//! ```text
//! LatencyTable + roster ──► assign_cities ──► generate_rules ──► RuleSet
//! ```
//!
//! Rule generation pairs every machine with every other machine, so it is `O(n²)` in the
//! size of the roster. The pairing order is what makes the output deterministic, so it is
//! kept as-is.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod assign;
pub mod command;
pub mod error;
pub mod generate;
pub mod latency;
pub mod machine;
pub mod rule;

pub use assign::assign_cities;
pub use error::{Error, LookupError, Result};
pub use generate::{generate_rules, HostRules, RuleSet};
pub use latency::{find_latency, LatencyRecord, LatencyTable};
pub use machine::{find_machine, Machine};
pub use rule::{Rule, RuleOptions};
