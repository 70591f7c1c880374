use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// One-way delays from an origin city towards every other city, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRecord {
    /// The origin city. Unique across a [`LatencyTable`].
    #[serde(rename = "From")]
    pub from: String,
    /// Delay in milliseconds, keyed by destination city.
    #[serde(rename = "Values")]
    pub values: BTreeMap<String, u32>,
}

impl LatencyRecord {
    /// Creates the record of city `from` with the given `(destination, delay_ms)` pairs.
    pub fn new<I, K>(from: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self {
            from: from.into(),
            values: values.into_iter().map(|(city, delay)| (city.into(), delay)).collect(),
        }
    }

    /// Returns the delay towards `destination`.
    ///
    /// A missing entry is an error, never an implicit zero delay.
    pub fn delay_to(&self, destination: &str) -> Result<u32, LookupError> {
        self.values.get(destination).copied().ok_or_else(|| LookupError::MissingDelay {
            origin: self.from.clone(),
            destination: destination.to_owned(),
        })
    }
}

/// The ordered set of latency records.
///
/// Order matters: it is the cycle used to assign cities to machines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatencyTable(Vec<LatencyRecord>);

impl LatencyTable {
    /// Creates a table; `records` order is the assignment cycle.
    pub fn new(records: Vec<LatencyRecord>) -> Self {
        Self(records)
    }

    /// Number of records, which is also the number of cities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the records in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, LatencyRecord> {
        self.0.iter()
    }

    /// Origin cities, in table order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|record| record.from.as_str())
    }

    /// See [`find_latency`].
    pub fn find(&self, city: &str) -> Result<&LatencyRecord, LookupError> {
        find_latency(city, self)
    }
}

impl From<Vec<LatencyRecord>> for LatencyTable {
    fn from(records: Vec<LatencyRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a LatencyTable {
    type Item = &'a LatencyRecord;
    type IntoIter = std::slice::Iter<'a, LatencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Finds the record whose origin is `city` with a linear scan.
pub fn find_latency<'a>(
    city: &str,
    table: &'a LatencyTable,
) -> Result<&'a LatencyRecord, LookupError> {
    table
        .iter()
        .find(|record| record.from == city)
        .ok_or_else(|| LookupError::City(city.to_owned()))
}
