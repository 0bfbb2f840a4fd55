use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::constants::{EVENTS_FILE, READINGS_FILE, SCENARIOS_FILE};
use crate::error::{Error, Result};
use crate::scenario::{ScenarioResult, ThermalEvent};
use crate::temperature::ThermalReading;
use crate::traits::ResultStore;

/// Result store writing one JSON document per line, one file per collection
#[derive(Debug)]
pub struct JsonLinesStore {
    dir: PathBuf,
    // serializes appends so concurrent writers never interleave lines
    write_lock: Mutex<()>,
}

impl JsonLinesStore {
    /// Open a store in `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::persistence(format!("cannot create {}: {}", dir.display(), e)))?;
        Ok(Self { dir, write_lock: Mutex::new(()) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn append<T: Serialize>(&self, file: &str, item: &T) -> Result<()> {
        let mut line = serde_json::to_string(item)?;
        line.push('\n');

        let path = self.dir.join(file);
        let _guard = self.write_lock.lock().await;
        let mut handle = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| Error::persistence(format!("cannot open {}: {}", path.display(), e)))?;
        handle
            .write_all(line.as_bytes())
            .await
            .map_err(|e| Error::persistence(format!("cannot write {}: {}", path.display(), e)))?;
        handle.flush().await.map_err(|e| Error::persistence(format!("cannot flush {}: {}", path.display(), e)))?;
        Ok(())
    }

    /// The last `limit` documents of `file`, newest first
    async fn tail<T: DeserializeOwned>(&self, file: &str, limit: usize) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::persistence(format!("cannot read {}: {}", path.display(), e))),
        };

        let lines: Vec<(usize, &str)> =
            contents.lines().enumerate().filter(|(_, line)| !line.trim().is_empty()).collect();

        lines
            .into_iter()
            .rev()
            .take(limit)
            .map(|(number, line)| {
                serde_json::from_str(line)
                    .map_err(|e| Error::persistence(format!("{}:{}: {}", path.display(), number + 1, e)))
            })
            .collect()
    }
}

#[async_trait]
impl ResultStore for JsonLinesStore {
    async fn save_scenario(&self, result: &ScenarioResult) -> Result<()> {
        self.append(SCENARIOS_FILE, result).await
    }

    async fn save_event(&self, event: &ThermalEvent) -> Result<()> {
        self.append(EVENTS_FILE, event).await
    }

    async fn save_reading(&self, reading: &ThermalReading) -> Result<()> {
        self.append(READINGS_FILE, reading).await
    }

    async fn recent_results(&self, limit: usize) -> Result<Vec<ScenarioResult>> {
        self.tail(SCENARIOS_FILE, limit).await
    }

    async fn recent_readings(&self, limit: usize) -> Result<Vec<ThermalReading>> {
        self.tail(READINGS_FILE, limit).await
    }

    async fn recent_events(&self, limit: usize) -> Result<Vec<ThermalEvent>> {
        self.tail(EVENTS_FILE, limit).await
    }
}
