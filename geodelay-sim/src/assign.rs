use crate::{
    error::{Error, Result},
    latency::LatencyTable,
    machine::Machine,
};

/// Assigns a city to every machine, round-robin over the cities of the latency table.
///
/// The machine at position `i` gets the origin city of `table[i % table.len()]`. There is no
/// randomness and no balancing objective: the same roster order always yields the same
/// assignment. With more machines than cities, cities repeat cyclically.
///
/// Fails with [`Error::EmptyLatencyTable`] if the table has no records.
pub fn assign_cities(machines: &mut [Machine], table: &LatencyTable) -> Result<()> {
    if table.is_empty() {
        return Err(Error::EmptyLatencyTable);
    }

    // Cycling the table pairs machine `i` with record `i % len`.
    for (machine, record) in machines.iter_mut().zip(table.iter().cycle()) {
        machine.set_city(record.from.as_str());

        tracing::debug!(host = %machine.host_name, city = %record.from, "assigned city");
    }

    tracing::info!(machines = machines.len(), cities = table.len(), "assigned cities");

    Ok(())
}
