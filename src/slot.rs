// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::fs::write;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;

/// A single named entry in a JSON key-value file on disk.
pub struct Slot {
    path: PathBuf,
    key: String,
}

impl Slot {
    pub fn new(path: PathBuf, key: &str) -> Self {
        Self {
            path,
            key: key.to_string(),
        }
    }

    /// Read the slot's value. A missing file, unreadable file, corrupt
    /// JSON, or absent key all yield `None`.
    pub fn read(&self) -> Option<Value> {
        let contents = read_to_string(&self.path).ok()?;
        let value: Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding corrupt slot file {:?}: {e}", self.path);
                return None;
            }
        };
        value.get(&self.key).cloned()
    }

    /// Replace the slot's value wholesale, rewriting the file.
    pub fn write(&self, value: &Value) -> Fallible<()> {
        let mut entries = match self.read_entries() {
            Some(entries) => entries,
            None => Map::new(),
        };
        entries.insert(self.key.clone(), value.clone());
        let contents = serde_json::to_string_pretty(&Value::Object(entries))?;
        write(&self.path, contents)?;
        Ok(())
    }

    fn read_entries(&self) -> Option<Map<String, Value>> {
        let contents = read_to_string(&self.path).ok()?;
        let value: Value = serde_json::from_str(&contents).ok()?;
        match value {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let slot = Slot::new(dir.path().join("store.json"), "deck");
        assert!(slot.read().is_none());
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        write(&path, "{not json").unwrap();
        let slot = Slot::new(path, "deck");
        assert!(slot.read().is_none());
    }

    #[test]
    fn test_read_absent_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        write(&path, r#"{"other": 1}"#).unwrap();
        let slot = Slot::new(path, "deck");
        assert!(slot.read().is_none());
    }

    #[test]
    fn test_write_then_read() -> Fallible<()> {
        let dir = tempdir().unwrap();
        let slot = Slot::new(dir.path().join("store.json"), "deck");
        slot.write(&json!([1, 2, 3]))?;
        assert_eq!(slot.read(), Some(json!([1, 2, 3])));
        Ok(())
    }

    #[test]
    fn test_write_replaces_wholesale() -> Fallible<()> {
        let dir = tempdir().unwrap();
        let slot = Slot::new(dir.path().join("store.json"), "deck");
        slot.write(&json!([1, 2, 3]))?;
        slot.write(&json!([4]))?;
        assert_eq!(slot.read(), Some(json!([4])));
        Ok(())
    }

    #[test]
    fn test_write_preserves_other_keys() -> Fallible<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        write(&path, r#"{"other": 1}"#).unwrap();
        let slot = Slot::new(path.clone(), "deck");
        slot.write(&json!([]))?;
        let other = Slot::new(path, "other");
        assert_eq!(other.read(), Some(json!(1)));
        Ok(())
    }
}
