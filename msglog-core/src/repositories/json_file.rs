// src/repositories/json_file.rs
//
// One `<namespace>.config.json` file per namespace, holding a JSON object of
// key -> value.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::trace;

use msglog_common::traits::KeyValueStore;
use msglog_common::Error;

pub struct JsonFileStore {
    root: PathBuf,
    // Serializes read-modify-write cycles on the namespace files.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, namespace: &str) -> PathBuf {
        self.root.join(format!("{namespace}.config.json"))
    }

    async fn read_namespace(&self, namespace: &str) -> Result<Map<String, Value>, Error> {
        let path = self.path_for(namespace);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Storage(format!(
                "{} does not hold a JSON object (found {})",
                path.display(),
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn save(&self, namespace: &str, key: &str, value: &Value) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.read_namespace(namespace).await?;
        map.insert(key.to_string(), value.clone());

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(namespace);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&Value::Object(map))?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        trace!("JsonFileStore: wrote {}/{} to {}", namespace, key, path.display());
        Ok(())
    }

    async fn load(&self, namespace: &str, key: &str) -> Result<Option<Value>, Error> {
        let mut map = self.read_namespace(namespace).await?;
        Ok(map.remove(key))
    }
}
