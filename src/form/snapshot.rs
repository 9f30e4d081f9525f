use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::Field;

static NULL: Value = Value::Null;

/// Field values of the form at one point in time.
///
/// Equality is structural over the JSON values, so `"25"` and `25` differ
/// while two separately built snapshots with the same values are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot(BTreeMap<Field, Value>);

impl FormSnapshot {
    /// Every field set to `value`.
    pub fn filled(value: Value) -> Self {
        Self(Field::ALL.iter().map(|&field| (field, value.clone())).collect())
    }

    /// The state of a freshly opened form: every field is `""`.
    pub fn blank() -> Self {
        Self::filled(Value::String(String::new()))
    }

    /// The state after a reset: every field is `null`.
    pub fn cleared() -> Self {
        Self::filled(Value::Null)
    }

    pub fn get(&self, field: Field) -> &Value {
        self.0.get(&field).unwrap_or(&NULL)
    }

    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        self.0.insert(field, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &Value)> {
        self.0.iter().map(|(&field, value)| (field, value))
    }
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self::blank()
    }
}
