//! Statistic snapshot - one member's counters at one point in time

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::sync::LazyLock;

use super::{json_kind, FieldSet};
use crate::error::DomainError;

/// Zero-filled snapshot over the current field set
pub static ZERO_CURRENT_SNAPSHOT: LazyLock<StatSnapshot> =
    LazyLock::new(|| StatSnapshot::zeroed(FieldSet::Current));

/// Zero-filled snapshot over the historical field set
pub static ZERO_HISTORICAL_SNAPSHOT: LazyLock<StatSnapshot> =
    LazyLock::new(|| StatSnapshot::zeroed(FieldSet::Historical));

/// Counters keyed by the fields of exactly one field set.
///
/// Always holds one value per field, in field-set order; serializes as a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSnapshot {
    field_set: FieldSet,
    values: Vec<i64>,
}

impl StatSnapshot {
    fn zeroed(field_set: FieldSet) -> Self {
        Self {
            field_set,
            values: vec![0; field_set.len()],
        }
    }

    /// Build a snapshot from an upstream `personalstats` selection.
    ///
    /// Accepts a mapping of name to counter or a list of `{"name", "value"}` records.
    /// Fields outside the set are ignored; missing or `null` fields are zero.
    pub fn from_personalstats(field_set: FieldSet, stats: &Value) -> Result<Self, DomainError> {
        let mut snapshot = Self::zeroed(field_set);

        match stats {
            Value::Object(counters) => {
                for (name, value) in counters {
                    snapshot.set_from_value(name, value)?;
                }
            }
            Value::Array(records) => {
                for record in records {
                    let name = record.get("name").and_then(Value::as_str).ok_or_else(|| {
                        DomainError::malformed("personalstats record without a name")
                    })?;
                    snapshot.set_from_value(name, record.get("value").unwrap_or(&Value::Null))?;
                }
            }
            other => {
                return Err(DomainError::malformed(format!(
                    "personalstats is a {}, expected an object or array",
                    json_kind(other)
                )));
            }
        }

        Ok(snapshot)
    }

    fn set_from_value(&mut self, name: &str, value: &Value) -> Result<(), DomainError> {
        let Some(index) = self.field_set.position(name) else {
            return Ok(());
        };

        self.values[index] = match value {
            Value::Null => 0,
            other => other.as_i64().ok_or_else(|| {
                DomainError::malformed(format!("stat {name} is a {}, expected an integer", json_kind(other)))
            })?,
        };
        Ok(())
    }

    pub fn field_set(&self) -> FieldSet {
        self.field_set
    }

    /// Counter for one field, `None` if the field is not part of this set
    pub fn get(&self, name: &str) -> Option<i64> {
        self.field_set.position(name).map(|index| self.values[index])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0)
    }

    /// Iterate `(field, counter)` pairs in field-set order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.field_set
            .fields()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}

impl Serialize for StatSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, &value)?;
        }
        map.end()
    }
}
