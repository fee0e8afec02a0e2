//! Process-wide table cache.
//!
//! The reference implementation bakes its phase-1 tables into constants per
//! (level, R, adj_frame, taps) template instantiation. Here the parameters
//! are runtime values, so tables are built lazily per key and shared
//! read-only across threads; the number of distinct keys in practice is a
//! handful of levels times three rotation counts times a few tap profiles.

use std::sync::Arc;

use dashmap::DashMap;
use famistack_core::RotationCount;
use once_cell::sync::Lazy;

use crate::config::SearchConfig;
use crate::phase1::SearchTables;

static TABLES: Lazy<DashMap<(SearchConfig, usize), Arc<SearchTables>>> =
    Lazy::new(DashMap::new);

/// Shared tables for a (config, rotation count) key, built on first use.
pub fn tables_for(config: &SearchConfig, rotations: RotationCount) -> Arc<SearchTables> {
    let key = (*config, rotations.as_usize());
    if let Some(hit) = TABLES.get(&key) {
        return hit.value().clone();
    }
    TABLES
        .entry(key)
        .or_insert_with(|| {
            Arc::new(SearchTables::build(
                config.level,
                rotations.as_usize(),
                config.adj_frame,
                config.taps,
            ))
        })
        .value()
        .clone()
}
