//! Shared application state.

use chrono::{DateTime, Utc};
use contractnl_core::{ContractNlConfig, QueryResult};
use contractnl_nlp::QueryProcessor;
use parking_lot::RwLock;
use serde::Serialize;

/// Running totals since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStats {
    pub queries_processed: u64,
    /// Queries that came back without a blocker.
    pub queries_routed: u64,
    pub queries_failed: u64,
}

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: ContractNlConfig,
    pub processor: QueryProcessor,
    pub started_at: DateTime<Utc>,
    pub stats: RwLock<QueryStats>,
}

impl AppState {
    pub fn new(config: ContractNlConfig) -> Self {
        let processor = QueryProcessor::new(config.pipeline);
        Self {
            config,
            processor,
            started_at: Utc::now(),
            stats: RwLock::new(QueryStats::default()),
        }
    }

    /// Count one processed query.
    pub fn record(&self, result: &QueryResult) {
        let mut stats = self.stats.write();
        stats.queries_processed += 1;
        if result.has_blocker() {
            stats.queries_failed += 1;
        } else {
            stats.queries_routed += 1;
        }
    }

    pub fn stats(&self) -> QueryStats {
        *self.stats.read()
    }
}
