use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use geodelay::{
    input::{self, LATENCIES_PATH, MACHINES_PATH},
    sim::command::Runner,
    Fleet, Pipeline, RuleOptions, Template,
};
use tracing_subscriber::EnvFilter;

/// Generate tcset rules emulating inter-city latency across a fleet of machines.
#[derive(Debug, Parser)]
#[command(name = "geodelay", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a shell script holding the rules of every host.
    Generate {
        #[command(flatten)]
        fleet: FleetArgs,
        /// Template for each host block. Defaults to a `case` on the short host name.
        #[arg(long)]
        template: Option<PathBuf>,
        /// Where the script is written.
        #[arg(short, long, default_value = "tc_rules.sh")]
        output: PathBuf,
    },
    /// Apply the rules of a single host on this machine.
    Apply {
        #[command(flatten)]
        fleet: FleetArgs,
        /// Host name, as found in the machine roster.
        #[arg(long)]
        host: String,
        /// Log the rules without running them.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Args)]
struct FleetArgs {
    /// JSON roster of machines.
    #[arg(short, long, default_value = MACHINES_PATH)]
    machines: PathBuf,
    /// JSON latency table.
    #[arg(short, long, default_value = LATENCIES_PATH)]
    latencies: PathBuf,
    /// Network interface the delays are attached to.
    #[arg(short, long, default_value = RuleOptions::DEFAULT_INTERFACE)]
    interface: String,
    /// Do not prefix commands with sudo.
    #[arg(long)]
    no_sudo: bool,
}

impl FleetArgs {
    fn options(&self) -> RuleOptions {
        RuleOptions::default().interface(self.interface.as_str()).sudo(!self.no_sudo)
    }

    fn plan(&self, pipeline: &Pipeline) -> geodelay::Result<Fleet> {
        let machines = input::load_machines(&self.machines)?;
        let table = input::load_latencies(&self.latencies)?;

        pipeline.plan(machines, &table)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let chain = geodelay::error_chain(&e);
            for (depth, message) in chain.iter().enumerate() {
                if depth == 0 {
                    tracing::error!("{message}");
                } else {
                    tracing::error!("caused by: {message}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> geodelay::Result<()> {
    match command {
        Command::Generate { fleet, template, output } => {
            let mut pipeline = Pipeline::new(fleet.options());
            if let Some(path) = template {
                pipeline = pipeline.with_template(load_template(&path)?);
            }

            let planned = fleet.plan(&pipeline)?;
            pipeline.write(&planned, &output)
        }
        Command::Apply { fleet, host, dry_run } => {
            let pipeline = Pipeline::new(fleet.options());
            let planned = fleet.plan(&pipeline)?;
            let rules = planned.host_rules(&host)?;

            if dry_run {
                for rule in rules {
                    tracing::info!(%host, %rule, "dry run");
                }
                return Ok(());
            }

            let applied = Runner::apply_all(rules)?;
            tracing::info!(%host, applied, "applied rules");

            Ok(())
        }
    }
}

fn load_template(path: &Path) -> geodelay::Result<Template> {
    let source = fs::read_to_string(path)
        .map_err(|source| geodelay::Error::Read { path: path.to_owned(), source })?;

    Template::parse(&source).map_err(|e| geodelay::Error::Script(e.into()))
}
