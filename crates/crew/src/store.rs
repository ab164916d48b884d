//! Bounded in-memory store for flow execution records

use std::{sync::Arc, time::Duration};

use moka::{future::Cache, policy::EvictionPolicy};

use crate::tracker::FlowExecutionRecord;

#[derive(Debug, Clone)]
pub struct FlowStoreConfig {
    /// Records beyond this count are evicted, least recently used first
    pub max_entries: u64,
    /// Records expire this long after insertion; `None` keeps them until evicted
    pub ttl: Option<Duration>,
}

impl Default for FlowStoreConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            ttl: Some(Duration::from_secs(86_400)),
        }
    }
}

/// Thread-safe map from flow id to its execution record.
///
/// Cloning is cheap and every clone sees the same records.
#[derive(Clone)]
pub struct FlowStore {
    records: Cache<String, Arc<FlowExecutionRecord>>,
}

impl FlowStore {
    pub fn new(config: &FlowStoreConfig) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(config.max_entries)
            .eviction_policy(EvictionPolicy::lru());
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            records: builder.build(),
        }
    }

    pub async fn insert(&self, record: FlowExecutionRecord) -> Arc<FlowExecutionRecord> {
        let record = Arc::new(record);
        self.records
            .insert(record.flow_id.clone(), record.clone())
            .await;
        tracing::debug!("[TRACKER] stored record {}", record.flow_id);
        record
    }

    pub async fn get(&self, flow_id: &str) -> Option<Arc<FlowExecutionRecord>> {
        self.records.get(flow_id).await
    }

    /// Up to `limit` records, newest first
    pub async fn recent(&self, limit: usize) -> Vec<Arc<FlowExecutionRecord>> {
        self.records.run_pending_tasks().await;

        let mut records: Vec<_> = self.records.iter().map(|(_, record)| record).collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        records
    }

    /// Number of live records
    pub async fn len(&self) -> u64 {
        self.records.run_pending_tasks().await;
        self.records.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for FlowStore {
    fn default() -> Self {
        Self::new(&FlowStoreConfig::default())
    }
}
