use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::scenario::{ScenarioResult, ThermalEvent};
use crate::temperature::ThermalReading;
use crate::traits::ResultStore;

/// Result store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    scenarios: RwLock<Vec<ScenarioResult>>,
    events: RwLock<Vec<ThermalEvent>>,
    readings: RwLock<Vec<ThermalReading>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored scenario, oldest first
    pub fn scenarios(&self) -> Vec<ScenarioResult> {
        self.scenarios.read().clone()
    }

    /// Every stored event, oldest first
    pub fn events(&self) -> Vec<ThermalEvent> {
        self.events.read().clone()
    }

    /// Every stored reading, oldest first
    pub fn readings(&self) -> Vec<ThermalReading> {
        self.readings.read().clone()
    }
}

fn newest<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    items.iter().rev().take(limit).cloned().collect()
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn save_scenario(&self, result: &ScenarioResult) -> Result<()> {
        self.scenarios.write().push(result.clone());
        Ok(())
    }

    async fn save_event(&self, event: &ThermalEvent) -> Result<()> {
        self.events.write().push(event.clone());
        Ok(())
    }

    async fn save_reading(&self, reading: &ThermalReading) -> Result<()> {
        self.readings.write().push(reading.clone());
        Ok(())
    }

    async fn recent_results(&self, limit: usize) -> Result<Vec<ScenarioResult>> {
        Ok(newest(&self.scenarios.read(), limit))
    }

    async fn recent_readings(&self, limit: usize) -> Result<Vec<ThermalReading>> {
        Ok(newest(&self.readings.read(), limit))
    }

    async fn recent_events(&self, limit: usize) -> Result<Vec<ThermalEvent>> {
        Ok(newest(&self.events.read(), limit))
    }
}
