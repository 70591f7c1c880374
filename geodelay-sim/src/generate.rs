use crate::{
    error::Result,
    latency::LatencyTable,
    machine::Machine,
    rule::{Rule, RuleOptions},
};

/// The rules of a single host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRules {
    /// Host identity of the machine the rules are applied on.
    pub host_name: String,
    /// One rule per machine in another city, in roster order.
    pub rules: Vec<Rule>,
}

impl HostRules {
    /// The rules rendered as shell commands.
    pub fn rule_strings(&self) -> Vec<String> {
        self.rules.iter().map(Rule::to_string).collect()
    }
}

/// Rules per host, in roster order.
///
/// Kept as an ordered list rather than a map so that iteration, and thus every script
/// rendered from it, is deterministic.
///
/// There is one entry per roster position. Host names are not checked for uniqueness: if
/// the roster repeats a host name, every entry is kept but [`RuleSet::get`] only returns the
/// first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet(Vec<HostRules>);

impl RuleSet {
    /// Number of hosts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no host.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The rules of the first entry named `host_name`, if any.
    pub fn get(&self, host_name: &str) -> Option<&[Rule]> {
        self.0
            .iter()
            .find(|entry| entry.host_name == host_name)
            .map(|entry| entry.rules.as_slice())
    }

    /// Iterates over the hosts in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, HostRules> {
        self.0.iter()
    }

    /// Total number of rules across all hosts.
    pub fn rule_count(&self) -> usize {
        self.0.iter().map(|entry| entry.rules.len()).sum()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a HostRules;
    type IntoIter = std::slice::Iter<'a, HostRules>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Generates, for every machine, the rules delaying its traffic towards every machine located
/// in a different city.
///
/// Both the outer loop (the machine the rules are for) and the inner loop (the destination)
/// follow roster order, so the output is identical across runs for the same input. Pairs in
/// the same city, including a machine with itself, are skipped. A machine with no peers in
/// other cities gets an empty rule list.
///
/// Any lookup failure aborts generation for the whole fleet:
/// - [`LookupError::Unassigned`] if a machine has no city yet;
/// - [`LookupError::City`] if a machine's city has no latency record;
/// - [`LookupError::MissingDelay`] if the record has no delay towards the destination city.
///
/// [`LookupError::Unassigned`]: crate::LookupError::Unassigned
/// [`LookupError::City`]: crate::LookupError::City
/// [`LookupError::MissingDelay`]: crate::LookupError::MissingDelay
pub fn generate_rules(
    machines: &[Machine],
    table: &LatencyTable,
    options: &RuleOptions,
) -> Result<RuleSet> {
    let mut rule_set = Vec::with_capacity(machines.len());

    for machine in machines {
        let city = machine.assigned_city()?;
        let mut rules = Vec::new();

        for other in machines {
            let other_city = other.assigned_city()?;
            if city == other_city {
                continue;
            }

            let delay = table.find(city)?.delay_to(other_city)?;
            rules.push(options.rule(other.ip_address.as_str(), delay));
        }

        tracing::debug!(host = %machine.host_name, %city, rules = rules.len(), "generated rules");

        rule_set.push(HostRules { host_name: machine.host_name.clone(), rules });
    }

    let rule_set = RuleSet(rule_set);
    tracing::info!(hosts = rule_set.len(), rules = rule_set.rule_count(), "generated rule set");

    Ok(rule_set)
}
