// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-admin back-navigation stacks.
//!
//! Stacks live in memory behind one lock and are mirrored to the session
//! store after every change. The lock only guards the in-memory mutation;
//! persistence runs afterwards on a copied snapshot, so a slow database
//! never blocks another admin's navigation.

use cb_core::{AdminId, NavEntry, WizardState};
use cb_storage::{SessionRepo, SessionStore};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Deepest history kept per admin; older frames are evicted first.
pub const MAX_DEPTH: usize = 10;

/// The in-memory half of navigation: bounded LIFO stacks keyed by admin
#[derive(Debug, Default)]
pub struct NavStacks {
    stacks: HashMap<AdminId, Vec<NavEntry>>,
    /// Admins whose stack has been reconciled with storage since startup
    loaded: HashSet<AdminId>,
}

impl NavStacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, returning the stack to persist when it changed.
    ///
    /// Entries without an action and repeats of the current top are
    /// ignored. Any accepted push makes the in-memory stack authoritative
    /// over storage.
    pub fn push(&mut self, admin: AdminId, entry: NavEntry) -> Option<Vec<NavEntry>> {
        if entry.action.is_empty() {
            return None;
        }
        self.loaded.insert(admin);
        let stack = self.stacks.entry(admin).or_default();
        if stack.last() == Some(&entry) {
            return None;
        }
        if stack.len() >= MAX_DEPTH {
            stack.remove(0);
        }
        stack.push(entry);
        Some(stack.clone())
    }

    /// Remove the top entry, returning it with the remaining stack.
    pub fn pop(&mut self, admin: AdminId) -> Option<(NavEntry, Vec<NavEntry>)> {
        let stack = self.stacks.get_mut(&admin)?;
        let top = stack.pop()?;
        let rest = stack.clone();
        if rest.is_empty() {
            self.stacks.remove(&admin);
        }
        Some((top, rest))
    }

    /// Drop the admin's stack; `true` when there was one.
    pub fn clear(&mut self, admin: AdminId) -> bool {
        self.stacks.remove(&admin).is_some()
    }

    pub fn snapshot(&self, admin: AdminId) -> Vec<NavEntry> {
        self.stacks.get(&admin).cloned().unwrap_or_default()
    }

    /// Replace the stack wholesale, keeping the most recent frames.
    pub fn restore(&mut self, admin: AdminId, mut entries: Vec<NavEntry>) {
        self.loaded.insert(admin);
        if entries.len() > MAX_DEPTH {
            entries.drain(..entries.len() - MAX_DEPTH);
        }
        if entries.is_empty() {
            self.stacks.remove(&admin);
        } else {
            self.stacks.insert(admin, entries);
        }
    }

    pub fn depth(&self, admin: AdminId) -> usize {
        self.stacks.get(&admin).map_or(0, Vec::len)
    }

    pub fn is_loaded(&self, admin: AdminId) -> bool {
        self.loaded.contains(&admin)
    }
}

/// Navigation stacks mirrored to the session store
pub struct Navigator<R> {
    stacks: Mutex<NavStacks>,
    store: SessionStore<R>,
}

impl<R: SessionRepo> Navigator<R> {
    pub fn new(store: SessionStore<R>) -> Self {
        Self {
            stacks: Mutex::new(NavStacks::new()),
            store,
        }
    }

    pub async fn push(&self, admin: AdminId, entry: NavEntry) {
        let changed = self.stacks.lock().push(admin, entry);
        if let Some(nav) = changed {
            self.persist(admin, &nav).await;
        }
    }

    pub async fn pop(&self, admin: AdminId) -> Option<NavEntry> {
        let popped = self.stacks.lock().pop(admin);
        let (top, rest) = popped?;
        self.persist(admin, &rest).await;
        Some(top)
    }

    /// Drop the stack, persisting only when one existed.
    pub async fn clear(&self, admin: AdminId) {
        self.clear_keeping(admin, None).await;
    }

    /// Drop the stack but write `wizard` back with the emptied row, so a
    /// form in progress survives the reset.
    pub async fn clear_keeping(&self, admin: AdminId, wizard: Option<&WizardState>) {
        let removed = self.stacks.lock().clear(admin);
        if !removed {
            return;
        }
        let flow = wizard.map(|w| w.flow.as_str());
        if let Err(e) = self.store.save(admin, flow, wizard, &[]).await {
            tracing::warn!(admin_id = %admin, flow, error = %e, "navigation persist failed");
        }
    }

    pub fn snapshot(&self, admin: AdminId) -> Vec<NavEntry> {
        self.stacks.lock().snapshot(admin)
    }

    /// Adopt a stack read from storage.
    pub fn restore(&self, admin: AdminId, entries: Vec<NavEntry>) {
        self.stacks.lock().restore(admin, entries);
    }

    /// Forget the in-memory stack without writing; used after the whole
    /// session row has been deleted.
    pub fn discard(&self, admin: AdminId) {
        self.stacks.lock().restore(admin, Vec::new());
    }

    pub fn depth(&self, admin: AdminId) -> usize {
        self.stacks.lock().depth(admin)
    }

    /// Hydrate the admin's stack from storage on first contact after a
    /// restart. A failed read is retried on the next interaction.
    pub async fn ensure_loaded(&self, admin: AdminId) {
        if self.stacks.lock().is_loaded(admin) {
            return;
        }
        match self.store.load(admin).await {
            Ok(session) => {
                let mut stacks = self.stacks.lock();
                // A push may have landed while the read was in flight
                if !stacks.is_loaded(admin) {
                    tracing::debug!(admin_id = %admin, depth = session.nav.len(), "navigation hydrated");
                    stacks.restore(admin, session.nav);
                }
            }
            Err(e) => {
                tracing::warn!(admin_id = %admin, error = %e, "navigation hydrate failed");
            }
        }
    }

    /// Mirror the stack to storage. Writes no flow, so any wizard in
    /// progress is abandoned by navigating.
    async fn persist(&self, admin: AdminId, nav: &[NavEntry]) {
        if let Err(e) = self.store.save(admin, None, None, nav).await {
            tracing::warn!(admin_id = %admin, depth = nav.len(), error = %e, "navigation persist failed");
        }
    }
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
