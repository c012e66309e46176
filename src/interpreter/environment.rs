use std::collections::HashMap;

use super::value::Value;

/// The single global variable store. Names are never removed.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Binds `name`, replacing whatever value (of whatever kind) it held.
    pub fn set(&mut self, name: &str, value: Value) {
        log::trace!("{} <- {:?}", name, value);
        self.values.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
