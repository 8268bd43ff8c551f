use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::domain::ports::RunStore;

/// In-memory run store. Many tasks write concurrently; all access goes
/// through the mutex.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), value);
    }

    fn push(&self, key: &str, value: Value) {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        match data.get_mut(key) {
            Some(Value::Array(items)) => items.push(value),
            _ => {
                data.insert(key.to_string(), Value::Array(vec![value]));
            }
        }
    }
}
