//! The `tcset` rule delaying traffic towards a single destination.

use std::{fmt, process::Command};

/// Options shared by every rule of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOptions {
    /// The local network interface the delay is attached to.
    pub interface: String,
    /// Whether the command is run through `sudo`.
    pub sudo: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self { interface: Self::DEFAULT_INTERFACE.to_string(), sudo: true }
    }
}

impl RuleOptions {
    /// Interface used when none is configured.
    pub const DEFAULT_INTERFACE: &'static str = "eno1";

    /// Set the network interface rules are attached to.
    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Set whether commands are prefixed with `sudo`.
    pub fn sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    /// Creates the rule delaying traffic towards `destination` by `delay_ms` milliseconds.
    pub fn rule(&self, destination: impl Into<String>, delay_ms: u32) -> Rule {
        Rule {
            interface: self.interface.clone(),
            destination: destination.into(),
            delay_ms,
            sudo: self.sudo,
        }
    }
}

/// Adds `delay_ms` of delay on `interface` to traffic destined for `destination`.
///
/// Its [`Display`](fmt::Display) form is the exact shell command:
///
/// ```text
/// sudo tcset --add eno1 --dst-network 10.0.0.2 --delay 50ms
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Local network interface the delay is attached to.
    pub interface: String,
    /// Destination address or network.
    pub destination: String,
    /// Delay in milliseconds.
    pub delay_ms: u32,
    /// Whether the command is run through `sudo`.
    pub sudo: bool,
}

impl Rule {
    const TOOL: &'static str = "tcset";

    /// Arguments passed to `tcset`.
    fn args(&self) -> [String; 6] {
        [
            "--add".to_string(),
            self.interface.clone(),
            "--dst-network".to_string(),
            self.destination.clone(),
            "--delay".to_string(),
            format!("{}ms", self.delay_ms),
        ]
    }

    /// Builds the command applying this rule.
    pub fn build(&self) -> Command {
        let mut cmd = if self.sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg(Self::TOOL);
            cmd
        } else {
            Command::new(Self::TOOL)
        };

        cmd.args(self.args());
        cmd
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sudo {
            f.write_str("sudo ")?;
        }

        write!(f, "{}", Self::TOOL)?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}
