use std::path::Path;

use geodelay_sim::{assign_cities, find_machine, generate_rules};

use crate::{LatencyTable, Machine, Result, Rule, RuleOptions, RuleSet, ScriptEmitter, Template};

/// A fleet whose machines carry their city, together with the rules derived for it.
///
/// The roster and the rules are handed to the emitter together, since every block needs the
/// host's city and address as well as its rules.
#[derive(Debug, Clone)]
pub struct Fleet {
    pub machines: Vec<Machine>,
    pub rules: RuleSet,
}

impl Fleet {
    /// The rules of `host_name`.
    pub fn host_rules(&self, host_name: &str) -> Result<&[Rule]> {
        let machine =
            find_machine(host_name, &self.machines).map_err(geodelay_sim::Error::from)?;
        Ok(self.rules.get(&machine.host_name).unwrap_or_default())
    }
}

/// Assigns cities, derives rules and renders the script.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: RuleOptions,
    emitter: ScriptEmitter,
}

impl Pipeline {
    pub fn new(options: RuleOptions) -> Self {
        Self { options, emitter: ScriptEmitter::default() }
    }

    /// Use `template` instead of the default one for host blocks.
    pub fn with_template(mut self, template: Template) -> Self {
        self.emitter = ScriptEmitter::new(template);
        self
    }

    /// Assigns a city to every machine and generates the rules of the whole fleet.
    pub fn plan(&self, mut machines: Vec<Machine>, table: &LatencyTable) -> Result<Fleet> {
        assign_cities(&mut machines, table)?;

        for machine in &machines {
            tracing::info!(host = %machine.host_name, city = machine.city(), "machine city");
        }

        let rules = generate_rules(&machines, table, &self.options)?;

        for entry in &rules {
            tracing::info!(host = %entry.host_name, rules = entry.rules.len(), "host rules");
            for rule in &entry.rules {
                tracing::debug!(host = %entry.host_name, %rule);
            }
        }

        Ok(Fleet { machines, rules })
    }

    pub fn render(&self, fleet: &Fleet) -> Result<String> {
        Ok(self.emitter.render(&fleet.rules, &fleet.machines)?)
    }

    /// Renders the script of `fleet` and writes it to `path`.
    pub fn write(&self, fleet: &Fleet, path: &Path) -> Result<()> {
        Ok(self.emitter.write(path, &fleet.rules, &fleet.machines)?)
    }
}
