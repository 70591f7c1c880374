//! Loading of the machine roster and the latency table from JSON files.
//!
//! The files use the shapes below; the assigned city is never part of the input.
//!
//! ```json
//! [{"HostName": "node1.example.com", "IPAddress": "10.0.0.1"}]
//! ```
//!
//! ```json
//! [{"From": "NY", "Values": {"NY": 0, "LA": 50}}]
//! ```

use std::{fs, path::Path};

use serde::de::DeserializeOwned;

use crate::{Error, LatencyTable, Machine, Result};

/// Default path of the machine roster.
pub const MACHINES_PATH: &str = "machines.json";
/// Default path of the latency table.
pub const LATENCIES_PATH: &str = "latencies.json";

pub fn load_machines(path: &Path) -> Result<Vec<Machine>> {
    let machines: Vec<Machine> = read_json(path)?;
    tracing::debug!(path = %path.display(), machines = machines.len(), "loaded machines");

    Ok(machines)
}

pub fn load_latencies(path: &Path) -> Result<LatencyTable> {
    let table: LatencyTable = read_json(path)?;
    tracing::debug!(path = %path.display(), cities = table.len(), "loaded latency table");

    Ok(table)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| Error::Read { path: path.to_owned(), source })?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Parse { path: path.to_owned(), source })
}
