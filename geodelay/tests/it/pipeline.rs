use std::{fs, path::Path};

use geodelay::{input, LookupError, Pipeline, RuleOptions, Template};

/// Helper functions.
mod helpers {
    use std::{fs, path::Path};

    pub const MACHINES: &str = r#"[
        {"HostName": "a.dc.example.com", "IPAddress": "10.0.0.1"},
        {"HostName": "b.dc.example.com", "IPAddress": "10.0.0.2"},
        {"HostName": "c.dc.example.com", "IPAddress": "10.0.0.3"}
    ]"#;

    pub const LATENCIES: &str = r#"[
        {"From": "NY", "Values": {"NY": 0, "LA": 50}},
        {"From": "LA", "Values": {"NY": 50, "LA": 0}}
    ]"#;

    /// Writes the roster and latency table fixtures into `dir`.
    pub fn write_fixtures(dir: &Path, machines: &str, latencies: &str) {
        fs::write(dir.join(geodelay::input::MACHINES_PATH), machines).unwrap();
        fs::write(dir.join(geodelay::input::LATENCIES_PATH), latencies).unwrap();
    }
}

fn plan_and_render(dir: &Path, pipeline: &Pipeline) -> geodelay::Result<String> {
    let machines = input::load_machines(&dir.join(input::MACHINES_PATH))?;
    let table = input::load_latencies(&dir.join(input::LATENCIES_PATH))?;

    let fleet = pipeline.plan(machines, &table)?;
    pipeline.render(&fleet)
}

#[test]
fn generate_script_from_files() {
    let dir = tempfile::tempdir().unwrap();
    helpers::write_fixtures(dir.path(), helpers::MACHINES, helpers::LATENCIES);

    let machines = input::load_machines(&dir.path().join(input::MACHINES_PATH)).unwrap();
    let table = input::load_latencies(&dir.path().join(input::LATENCIES_PATH)).unwrap();

    let pipeline = Pipeline::default();
    let fleet = pipeline.plan(machines, &table).unwrap();
    let output = dir.path().join("tc_rules.sh");
    pipeline.write(&fleet, &output).unwrap();

    let script = fs::read_to_string(&output).unwrap();
    let expected = "\
#!/usr/bin/env bash
# Generated by geodelay.
set -e

# a (NY, 10.0.0.1)
case \"$(hostname -s)\" in
a)
    sudo tcset --add eno1 --dst-network 10.0.0.2 --delay 50ms
    ;;
esac

# b (LA, 10.0.0.2)
case \"$(hostname -s)\" in
b)
    sudo tcset --add eno1 --dst-network 10.0.0.1 --delay 50ms
    sudo tcset --add eno1 --dst-network 10.0.0.3 --delay 50ms
    ;;
esac

# c (NY, 10.0.0.3)
case \"$(hostname -s)\" in
c)
    sudo tcset --add eno1 --dst-network 10.0.0.2 --delay 50ms
    ;;
esac

";
    assert_eq!(script, expected);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    helpers::write_fixtures(dir.path(), helpers::MACHINES, helpers::LATENCIES);

    let pipeline = Pipeline::new(RuleOptions::default().interface("eth0"));
    let first = plan_and_render(dir.path(), &pipeline).unwrap();
    let second = plan_and_render(dir.path(), &pipeline).unwrap();

    assert_eq!(first, second);
}

#[test]
fn custom_template() {
    let dir = tempfile::tempdir().unwrap();
    helpers::write_fixtures(dir.path(), helpers::MACHINES, helpers::LATENCIES);

    let template = Template::parse("[{{ host }}]\n{{ rule }}\n").unwrap();
    let pipeline = Pipeline::new(RuleOptions::default().sudo(false)).with_template(template);
    let script = plan_and_render(dir.path(), &pipeline).unwrap();

    assert!(script.ends_with(
        "[a]\n\
         tcset --add eno1 --dst-network 10.0.0.2 --delay 50ms\n\
         [b]\n\
         tcset --add eno1 --dst-network 10.0.0.1 --delay 50ms\n\
         tcset --add eno1 --dst-network 10.0.0.3 --delay 50ms\n\
         [c]\n\
         tcset --add eno1 --dst-network 10.0.0.2 --delay 50ms\n"
    ));
}

#[test]
fn empty_latency_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    helpers::write_fixtures(dir.path(), helpers::MACHINES, "[]");

    let err = plan_and_render(dir.path(), &Pipeline::default()).unwrap_err();
    assert!(matches!(err, geodelay::Error::Sim(geodelay::sim::Error::EmptyLatencyTable)));
}

#[test]
fn missing_delay_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let latencies = r#"[
        {"From": "NY", "Values": {"NY": 0, "LA": 50}},
        {"From": "LA", "Values": {"LA": 0}}
    ]"#;
    helpers::write_fixtures(dir.path(), helpers::MACHINES, latencies);

    let err = plan_and_render(dir.path(), &Pipeline::default()).unwrap_err();
    assert!(matches!(
        err,
        geodelay::Error::Sim(geodelay::sim::Error::Lookup(LookupError::MissingDelay {
            ref origin,
            ref destination,
        })) if origin == "LA" && destination == "NY"
    ));
}
