//! Positional parameter lists for JSON-RPC 1.0 calls.
//!
//! The daemon only understands positional parameters, so an optional argument
//! can be left out only if every argument after it is left out too. [`Params`]
//! records optional slots as they are pushed and, when converted, drops unset
//! trailing slots. An unset slot followed by a set one is filled: with the
//! daemon's own default when the wrapper supplied one through
//! [`opt_or`](Params::opt_or), otherwise with `null`.

use serde_json::Value;

#[derive(Debug, Clone)]
struct Slot {
    value: Option<Value>,
    fill: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Params {
    slots: Vec<Slot>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.slots.push(Slot {
            value: Some(value.into()),
            fill: Value::Null,
        });
        self
    }

    /// Append an optional argument that the daemon accepts as `null`.
    pub fn opt<T: Into<Value>>(mut self, value: Option<T>) -> Self {
        self.slots.push(Slot {
            value: value.map(Into::into),
            fill: Value::Null,
        });
        self
    }

    /// Append an optional argument, sending `default` if a later argument is set.
    pub fn opt_or<T: Into<Value>>(mut self, value: Option<T>, default: impl Into<Value>) -> Self {
        self.slots.push(Slot {
            value: value.map(Into::into),
            fill: default.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Convert to the wire array.
    pub fn into_vec(mut self) -> Vec<Value> {
        while self.slots.last().is_some_and(|slot| slot.value.is_none()) {
            self.slots.pop();
        }
        self.slots
            .into_iter()
            .map(|slot| slot.value.unwrap_or(slot.fill))
            .collect()
    }
}

impl From<Params> for Vec<Value> {
    fn from(params: Params) -> Self {
        params.into_vec()
    }
}
