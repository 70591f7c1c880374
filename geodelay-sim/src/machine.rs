use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A machine of the fleet.
///
/// The city is not part of the serialized form: it starts out unset and is filled in exactly
/// once by [`crate::assign_cities`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Unique, stable identity of the machine, e.g. `node1.cluster.example.com`.
    #[serde(rename = "HostName")]
    pub host_name: String,
    /// Address (or network) other machines use to reach this one.
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(skip)]
    city: Option<String>,
}

impl Machine {
    /// Creates a machine with no city assigned.
    pub fn new(host_name: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self { host_name: host_name.into(), ip_address: ip_address.into(), city: None }
    }

    /// The city assigned to this machine, if any.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Returns the assigned city, or [`LookupError::Unassigned`] if assignment has not run.
    pub fn assigned_city(&self) -> Result<&str, LookupError> {
        self.city().ok_or_else(|| LookupError::Unassigned(self.host_name.clone()))
    }

    /// The host name up to the first `.`, e.g. `node1` for `node1.cluster.example.com`.
    pub fn short_host_name(&self) -> &str {
        self.host_name.split('.').next().unwrap_or(&self.host_name)
    }

    pub(crate) fn set_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
    }
}

/// Finds the machine with the given host name in the roster.
///
/// Host names are expected to be unique; if the roster repeats one, the first machine is
/// returned.
pub fn find_machine<'a>(
    host_name: &str,
    machines: &'a [Machine],
) -> Result<&'a Machine, LookupError> {
    machines
        .iter()
        .find(|machine| machine.host_name == host_name)
        .ok_or_else(|| LookupError::Machine(host_name.to_owned()))
}
