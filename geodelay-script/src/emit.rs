use std::{fs, io, path::Path};

use geodelay_sim::{find_machine, Machine, RuleSet};

use crate::{
    template::{Block, Template},
    Result,
};

/// Renders rule sets into a complete shell script.
#[derive(Debug, Clone, Default)]
pub struct ScriptEmitter {
    template: Template,
}

impl ScriptEmitter {
    /// Written once at the top of every script.
    pub const HEADER: &'static str = "#!/usr/bin/env bash\n# Generated by geodelay.\nset -e\n\n";

    /// Creates an emitter rendering host blocks with `template`.
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Renders one block per host, in rule set order.
    ///
    /// Every host is resolved back to its machine in the roster to fetch its city and address;
    /// a host missing from the roster fails the whole rendering. Host names are expected to be
    /// unique: a repeated host name resolves to its first machine, so each of its blocks shows
    /// that machine's city and address.
    pub fn render(&self, rule_set: &RuleSet, machines: &[Machine]) -> Result<String> {
        let mut script = String::from(Self::HEADER);

        for entry in rule_set {
            let machine = find_machine(&entry.host_name, machines)?;
            let rules = entry.rule_strings();

            let block = Block {
                host: machine.short_host_name(),
                city: machine.assigned_city()?,
                address: &machine.ip_address,
                rules: &rules,
            };

            script.push_str(&self.template.render(&block));
            tracing::debug!(host = %entry.host_name, rules = rules.len(), "rendered block");
        }

        Ok(script)
    }

    /// Renders the script and writes it to `path`.
    pub fn write(&self, path: &Path, rule_set: &RuleSet, machines: &[Machine]) -> Result<()> {
        let script = self.render(rule_set, machines)?;
        write_script(path, &script)?;

        tracing::info!(path = %path.display(), hosts = rule_set.len(), "wrote script");

        Ok(())
    }
}

/// Writes `contents` to `path`, replacing any existing file. On unix the file is made
/// executable.
pub fn write_script(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use geodelay_sim::{
        assign_cities, generate_rules, LatencyRecord, LatencyTable, LookupError, RuleOptions,
    };

    use super::*;
    use crate::Error;

    fn fleet() -> (Vec<Machine>, RuleSet) {
        let table = LatencyTable::new(vec![
            LatencyRecord::new("NY", [("NY", 0), ("LA", 50)]),
            LatencyRecord::new("LA", [("NY", 50), ("LA", 0)]),
        ]);
        let mut machines = vec![
            Machine::new("a.example.com", "10.0.0.1"),
            Machine::new("b.example.com", "10.0.0.2"),
        ];
        assign_cities(&mut machines, &table).unwrap();
        let rules = generate_rules(&machines, &table, &RuleOptions::default()).unwrap();

        (machines, rules)
    }

    #[test]
    fn test_render_blocks_in_order() {
        let (machines, rules) = fleet();
        let template =
            Template::parse("{{ host }} {{ city }} {{ address }}\n> {{ rule }}\n").unwrap();

        let script = ScriptEmitter::new(template).render(&rules, &machines).unwrap();

        let expected = format!(
            "{}{}",
            ScriptEmitter::HEADER,
            "a NY 10.0.0.1\n\
             > sudo tcset --add eno1 --dst-network 10.0.0.2 --delay 50ms\n\
             b LA 10.0.0.2\n\
             > sudo tcset --add eno1 --dst-network 10.0.0.1 --delay 50ms\n"
        );
        assert_eq!(script, expected);
    }

    #[test]
    fn test_unknown_host_fails() {
        let (machines, rules) = fleet();

        let err = ScriptEmitter::default().render(&rules, &machines[..1]).unwrap_err();
        assert!(matches!(
            err,
            Error::Lookup(LookupError::Machine(host)) if host == "b.example.com"
        ));
    }

    #[test]
    fn test_repeated_host_resolves_to_first_machine() {
        let table = LatencyTable::new(vec![
            LatencyRecord::new("NY", [("NY", 0), ("LA", 50)]),
            LatencyRecord::new("LA", [("NY", 50), ("LA", 0)]),
        ]);
        let mut machines = vec![Machine::new("a", "10.0.0.1"), Machine::new("a", "10.0.0.2")];
        assign_cities(&mut machines, &table).unwrap();
        let rules = generate_rules(&machines, &table, &RuleOptions::default()).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("a").unwrap()[0].destination, "10.0.0.2");

        let template = Template::parse("{{ address }} {{ city }}\n").unwrap();
        let script = ScriptEmitter::new(template).render(&rules, &machines).unwrap();

        assert_eq!(script, format!("{}10.0.0.1 NY\n10.0.0.1 NY\n", ScriptEmitter::HEADER));
    }

    #[test]
    fn test_write_script() {
        let (machines, rules) = fleet();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tc_rules.sh");

        let emitter = ScriptEmitter::default();
        emitter.write(&path, &rules, &machines).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, emitter.render(&rules, &machines).unwrap());
        assert!(written.starts_with("#!/usr/bin/env bash\n"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
