// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tri-state field updates.
//!
//! A patchable field can be left alone, set to a new value, or cleared to
//! NULL. `Option<Option<T>>` can express the same thing but reads poorly
//! at call sites, so updates use [`Patch`] instead.

/// One field of a partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Set(T),
    Cleared,
}

impl<T> Patch<T> {
    /// `Some` becomes `Set`, `None` becomes `Cleared`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Cleared,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(v) => Patch::Set(v),
            Patch::Cleared => Patch::Cleared,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(v) => Patch::Set(f(v)),
            Patch::Cleared => Patch::Cleared,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Patch::Unchanged => Patch::Unchanged,
            Patch::Set(v) => Patch::Set(f(v)?),
            Patch::Cleared => Patch::Cleared,
        })
    }

    /// Value to write when the field is touched: `Some(Some(v))` for a set,
    /// `Some(None)` for a clear, `None` when untouched.
    pub fn into_update(self) -> Option<Option<T>> {
        match self {
            Patch::Unchanged => None,
            Patch::Set(v) => Some(Some(v)),
            Patch::Cleared => Some(None),
        }
    }

    /// Apply onto a nullable field in place.
    pub fn apply_to(self, target: &mut Option<T>) {
        if let Some(update) = self.into_update() {
            *target = update;
        }
    }
}

impl<T: PartialEq> Patch<T> {
    /// Collapse a `Set` equal to `current` into `Unchanged`.
    pub fn unless_equal(self, current: Option<&T>) -> Self {
        match (&self, current) {
            (Patch::Set(v), Some(c)) if v == c => Patch::Unchanged,
            (Patch::Cleared, None) => Patch::Unchanged,
            _ => self,
        }
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
