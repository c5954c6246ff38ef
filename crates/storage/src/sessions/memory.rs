// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory session store for tests
#![cfg_attr(coverage_nightly, coverage(off))]

use super::SessionRepo;
use crate::StorageError;
use async_trait::async_trait;
use cb_core::{AdminId, Clock, FakeClock, SessionRecord};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Recorded write against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Upsert {
        admin: AdminId,
        current_flow: Option<String>,
        flow_state: Option<Vec<u8>>,
    },
    Delete {
        admin: AdminId,
    },
}

struct MemorySessionState {
    rows: HashMap<AdminId, SessionRecord>,
    calls: Vec<SessionCall>,
    /// Number of upcoming writes that fail before the store recovers
    failing_writes: usize,
    failing_reads: bool,
}

/// Session store backed by a `HashMap`, with write-failure injection
#[derive(Clone)]
pub struct MemorySessionRepo {
    inner: Arc<Mutex<MemorySessionState>>,
    clock: FakeClock,
}

impl Default for MemorySessionRepo {
    fn default() -> Self {
        Self::with_clock(FakeClock::new())
    }
}

impl MemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `updated_at` from `clock` so staleness can be simulated.
    pub fn with_clock(clock: FakeClock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemorySessionState {
                rows: HashMap::new(),
                calls: Vec::new(),
                failing_writes: 0,
                failing_reads: false,
            })),
            clock,
        }
    }

    /// Get all recorded writes
    pub fn calls(&self) -> Vec<SessionCall> {
        self.inner.lock().calls.clone()
    }

    pub fn row(&self, admin: AdminId) -> Option<SessionRecord> {
        self.inner.lock().rows.get(&admin).cloned()
    }

    /// Seed a row directly, bypassing call recording.
    pub fn insert_raw(&self, admin: AdminId, current_flow: Option<&str>, flow_state: Option<&[u8]>) {
        let record = SessionRecord {
            admin_id: admin,
            current_flow: current_flow.map(str::to_string),
            flow_state: flow_state.map(<[u8]>::to_vec),
            updated_at: self.clock.now(),
        };
        self.inner.lock().rows.insert(admin, record);
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: usize) {
        self.inner.lock().failing_writes = count;
    }

    pub fn set_failing_reads(&self, failing: bool) {
        self.inner.lock().failing_reads = failing;
    }

    fn take_write_failure(state: &mut MemorySessionState) -> Result<(), StorageError> {
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(StorageError::Unavailable("injected write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepo for MemorySessionRepo {
    async fn get(&self, admin: AdminId) -> Result<Option<SessionRecord>, StorageError> {
        let state = self.inner.lock();
        if state.failing_reads {
            return Err(StorageError::Unavailable("injected read failure".into()));
        }
        Ok(state.rows.get(&admin).cloned())
    }

    async fn upsert(
        &self,
        admin: AdminId,
        current_flow: Option<&str>,
        flow_state: Option<&[u8]>,
    ) -> Result<(), StorageError> {
        let mut state = self.inner.lock();
        Self::take_write_failure(&mut state)?;
        let record = SessionRecord {
            admin_id: admin,
            current_flow: current_flow.map(str::to_string),
            flow_state: flow_state.map(<[u8]>::to_vec),
            updated_at: self.clock.now(),
        };
        state.calls.push(SessionCall::Upsert {
            admin,
            current_flow: record.current_flow.clone(),
            flow_state: record.flow_state.clone(),
        });
        state.rows.insert(admin, record);
        Ok(())
    }

    async fn delete(&self, admin: AdminId) -> Result<(), StorageError> {
        let mut state = self.inner.lock();
        Self::take_write_failure(&mut state)?;
        state.calls.push(SessionCall::Delete { admin });
        state.rows.remove(&admin);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SessionRecord>, StorageError> {
        let mut rows: Vec<SessionRecord> = self.inner.lock().rows.values().cloned().collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }
}
